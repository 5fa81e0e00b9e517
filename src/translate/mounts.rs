// ABOUTME: Mount declarations to daemon mounts.
// ABOUTME: Only the option block matching the mount type is carried over.

use super::convert::non_empty_map;
use crate::config::{MountSpec, MountType, Propagation};
use bollard::models::{
    Mount, MountBindOptions, MountBindOptionsPropagationEnum, MountTmpfsOptions, MountTypeEnum,
    MountVolumeOptions, MountVolumeOptionsDriverConfig,
};

pub fn translate_mounts(mounts: &[MountSpec]) -> Vec<Mount> {
    mounts.iter().map(translate_mount).collect()
}

fn translate_mount(spec: &MountSpec) -> Mount {
    let mut mount = Mount {
        target: Some(spec.target.clone()),
        source: spec.source.clone(),
        read_only: spec.read_only,
        ..Default::default()
    };

    match spec.kind {
        MountType::Bind => {
            mount.typ = Some(MountTypeEnum::BIND);
            mount.bind_options = spec.bind_options.as_ref().map(|opts| MountBindOptions {
                propagation: opts.propagation.map(propagation),
                ..Default::default()
            });
        }
        MountType::Volume => {
            mount.typ = Some(MountTypeEnum::VOLUME);
            mount.volume_options = spec.volume_options.as_ref().map(|opts| {
                let driver_config =
                    if opts.driver_name.is_some() || !opts.driver_options.is_empty() {
                        Some(MountVolumeOptionsDriverConfig {
                            name: opts.driver_name.clone(),
                            options: non_empty_map(&opts.driver_options),
                        })
                    } else {
                        None
                    };
                MountVolumeOptions {
                    no_copy: opts.no_copy,
                    labels: non_empty_map(&opts.labels),
                    driver_config,
                    ..Default::default()
                }
            });
        }
        MountType::Tmpfs => {
            mount.typ = Some(MountTypeEnum::TMPFS);
            mount.tmpfs_options = spec.tmpfs_options.as_ref().map(|opts| MountTmpfsOptions {
                size_bytes: opts.size_bytes,
                mode: opts.mode,
                ..Default::default()
            });
        }
    }

    mount
}

fn propagation(p: Propagation) -> MountBindOptionsPropagationEnum {
    match p {
        Propagation::Private => MountBindOptionsPropagationEnum::PRIVATE,
        Propagation::Rprivate => MountBindOptionsPropagationEnum::RPRIVATE,
        Propagation::Shared => MountBindOptionsPropagationEnum::SHARED,
        Propagation::Rshared => MountBindOptionsPropagationEnum::RSHARED,
        Propagation::Slave => MountBindOptionsPropagationEnum::SLAVE,
        Propagation::Rslave => MountBindOptionsPropagationEnum::RSLAVE,
    }
}
