// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mount isolation validation.
//!
//! No agent's mounts may reach into another agent's private partitions
//! (`tasks`, `results`, `knowledge`). The check is a component-wise
//! path-prefix test against `<partition root>/<owner>/`, so partial name
//! overlap (`billing` vs `billing2`) cannot slip through. Paths outside
//! the partition roots are unrestricted.

use std::path::Component;

use roster_core::{Layout, MountEntry, PARTITION_ROOTS};
use thiserror::Error;

/// A mount that resolves inside another agent's partition.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("mount `{host}` reaches into agent `{owner}`'s {partition} partition")]
pub struct MountViolation {
    pub host: String,
    pub owner: String,
    pub partition: String,
}

/// Validate candidate mounts for the agent provisioned under `folder`.
///
/// Relative host paths are resolved against the layout root before
/// checking. The first offending mount is reported; the caller treats
/// any violation as fatal for the whole spec.
pub fn validate_mounts(
    folder: &str,
    mounts: &[MountEntry],
    layout: &Layout,
) -> Result<(), MountViolation> {
    for mount in mounts {
        let host = layout.resolve_host_path(&mount.host_path);
        for partition in PARTITION_ROOTS {
            let root = layout.partition_root(partition);
            let Ok(rest) = host.strip_prefix(&root) else {
                continue;
            };
            let Some(Component::Normal(owner)) = rest.components().next() else {
                continue;
            };
            let owner = owner.to_string_lossy();
            if owner != folder {
                return Err(MountViolation {
                    host: mount.host_path.display().to_string(),
                    owner: owner.into_owned(),
                    partition: partition.to_string(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "isolation_tests.rs"]
mod tests;
