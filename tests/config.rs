// ABOUTME: Integration tests for desired-state parsing and defaults.
// ABOUTME: Tests YAML parsing, lifecycle defaults, and reconciler settings.

use berth::config::*;
use std::time::Duration;

mod parsing {
    use super::*;

    #[test]
    fn parse_minimal_document() {
        let desired = DesiredContainer::from_yaml("name: web\nimage: nginx:alpine\n").unwrap();

        assert_eq!(desired.name.as_str(), "web");
        assert_eq!(desired.image, "nginx:alpine");
        assert!(desired.ports.is_empty());
        assert!(desired.command.is_none());
    }

    #[test]
    fn lifecycle_defaults() {
        let desired = DesiredContainer::from_yaml("name: web\nimage: nginx\n").unwrap();
        let lifecycle = desired.lifecycle;

        assert!(lifecycle.start);
        assert!(lifecycle.must_run);
        assert!(!lifecycle.rm);
        assert!(!lifecycle.attach);
        assert!(!lifecycle.logs);
        assert_eq!(lifecycle.destroy_grace_period, None);
    }

    #[test]
    fn schema_defaults() {
        let desired = DesiredContainer::from_yaml("name: web\nimage: nginx\n").unwrap();

        assert_eq!(desired.restart, RestartPolicy::No);
        assert_eq!(desired.log_driver, LogDriver::JsonFile);
        assert!(!desired.privileged);
    }

    #[test]
    fn grace_period_is_a_human_duration() {
        let yaml = r#"
name: worker
image: busybox
lifecycle:
  rm: true
  destroy_grace_period: 1m 30s
"#;
        let desired = DesiredContainer::from_yaml(yaml).unwrap();

        assert!(desired.lifecycle.rm);
        assert_eq!(
            desired.lifecycle.destroy_grace_period,
            Some(Duration::from_secs(90))
        );
    }

    #[test]
    fn port_protocol_defaults_to_tcp() {
        let yaml = r#"
name: web
image: nginx
ports:
  - internal: 80
  - internal: 53
    protocol: udp
    external: 5353
"#;
        let desired = DesiredContainer::from_yaml(yaml).unwrap();

        assert_eq!(desired.ports[0].protocol, Protocol::Tcp);
        assert_eq!(desired.ports[0].host_ip(), DEFAULT_HOST_IP);
        assert_eq!(desired.ports[1].protocol, Protocol::Udp);
        assert_eq!(desired.ports[1].external, Some(5353));
    }

    #[test]
    fn healthcheck_durations_default_to_zero() {
        let yaml = r#"
name: web
image: nginx
healthcheck:
  test: ["CMD-SHELL", "true"]
"#;
        let desired = DesiredContainer::from_yaml(yaml).unwrap();
        let health = desired.healthcheck.unwrap();

        assert_eq!(health.interval, "0s");
        assert_eq!(health.timeout, "0s");
        assert_eq!(health.start_period, "0s");
        assert_eq!(health.retries, 0);
    }

    #[test]
    fn mount_types_and_options() {
        let yaml = r#"
name: web
image: nginx
mounts:
  - target: /etc/nginx
    source: /srv/nginx
    type: bind
    read_only: true
    bind_options:
      propagation: rslave
  - target: /var/cache
    type: volume
    source: cache
    volume_options:
      no_copy: true
      driver_name: local
"#;
        let desired = DesiredContainer::from_yaml(yaml).unwrap();

        assert_eq!(desired.mounts[0].kind, MountType::Bind);
        assert_eq!(
            desired.mounts[0].bind_options.as_ref().unwrap().propagation,
            Some(Propagation::Rslave)
        );
        assert_eq!(desired.mounts[1].kind, MountType::Volume);
        assert_eq!(
            desired.mounts[1]
                .volume_options
                .as_ref()
                .unwrap()
                .driver_name
                .as_deref(),
            Some("local")
        );
    }

    #[test]
    fn restart_policy_names() {
        for (raw, policy) in [
            ("no", RestartPolicy::No),
            ("always", RestartPolicy::Always),
            ("unless-stopped", RestartPolicy::UnlessStopped),
            ("on-failure", RestartPolicy::OnFailure),
        ] {
            let yaml = format!("name: web\nimage: nginx\nrestart: {raw}\n");
            assert_eq!(DesiredContainer::from_yaml(&yaml).unwrap().restart, policy);
        }
    }
}

mod validation {
    use super::*;

    #[test]
    fn invalid_container_name_rejected() {
        let result = DesiredContainer::from_yaml("name: -web\nimage: nginx\n");
        assert!(result.is_err());
    }

    #[test]
    fn invalid_network_alias_rejected() {
        let yaml = r#"
name: web
image: nginx
network_aliases: ["has space"]
"#;
        assert!(DesiredContainer::from_yaml(yaml).is_err());
    }

    #[test]
    fn unknown_log_driver_rejected() {
        let yaml = "name: web\nimage: nginx\nlog_driver: splunk-ish\n";
        assert!(DesiredContainer::from_yaml(yaml).is_err());
    }

    #[test]
    fn unknown_mount_type_rejected() {
        let yaml = r#"
name: web
image: nginx
mounts:
  - target: /x
    type: npipe
"#;
        assert!(DesiredContainer::from_yaml(yaml).is_err());
    }

    #[test]
    fn missing_image_rejected() {
        assert!(DesiredContainer::from_yaml("name: web\n").is_err());
    }
}

mod settings {
    use super::*;

    #[test]
    fn defaults_poll_thirty_times_every_half_second() {
        let settings = ReconcilerSettings::default();

        assert_eq!(settings.poll_attempts, 30);
        assert_eq!(settings.poll_interval, Duration::from_millis(500));
        assert_eq!(settings.default_network, "bridge");
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let settings = ReconcilerSettings::from_yaml("poll_interval: 2s\n").unwrap();

        assert_eq!(settings.poll_interval, Duration::from_secs(2));
        assert_eq!(settings.poll_attempts, 30);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yml");
        std::fs::write(&path, "poll_attempts: 5\ndefault_network: podman\n").unwrap();

        let settings = ReconcilerSettings::load(&path).unwrap();

        assert_eq!(settings.poll_attempts, 5);
        assert_eq!(settings.default_network, "podman");
    }
}

mod round_trip {
    use super::*;

    #[test]
    fn desired_state_survives_json_state_file() {
        let yaml = r#"
name: web
image: nginx
ports:
  - internal: 80
    external: 8080
lifecycle:
  destroy_grace_period: 10s
"#;
        let desired = DesiredContainer::from_yaml(yaml).unwrap();
        let json = serde_json::to_string(&desired).unwrap();
        let back: DesiredContainer = serde_json::from_str(&json).unwrap();

        assert_eq!(back, desired);
    }
}
