// ABOUTME: Create: image check, translate, create, networks, uploads, start, attach, read.
// ABOUTME: A failing step aborts; the created container is left for delete to clean up.

use super::error::{
    AlreadyCreatedSnafu, ArchiveSnafu, CreateSnafu, ImageResolutionSnafu, NetworkConnectSnafu,
    NetworkDisconnectSnafu, ReconcileError, StartSnafu, TranslateSnafu, UploadSnafu,
};
use super::reconciler::Reconciler;
use super::record::{ContainerRecord, ObservedState};
use super::upload::{UPLOAD_ROOT, upload_archive};
use crate::config::UploadSpec;
use crate::runtime::{NetworkError, RuntimeGateway};
use crate::translate::{NetworkAttach, translate};
use crate::types::{ContainerId, NetworkId};
use chrono::Utc;
use snafu::ResultExt;

impl<R: RuntimeGateway> Reconciler<R> {
    /// Bring the record's container into existence and read it back.
    ///
    /// The runtime ID is recorded as soon as the create call returns, so a
    /// later failure still leaves something for [`Reconciler::delete`].
    pub async fn create(&self, record: &mut ContainerRecord) -> Result<(), ReconcileError> {
        if let Some(id) = &record.id {
            return AlreadyCreatedSnafu { id: id.clone() }.fail();
        }
        let desired = record.desired.clone();

        self.ensure_image(&desired.image).await?;
        let translation = translate(&desired).context(TranslateSnafu)?;

        let id = self
            .runtime
            .create_container(&translation.request)
            .await
            .context(CreateSnafu {
                name: desired.name.to_string(),
            })?;
        tracing::info!(container_id = %id, name = %desired.name, "container created");
        record.id = Some(id.clone());
        record.observed = None;

        self.attach_networks(&id, &translation.networks).await?;

        for upload in &desired.uploads {
            self.upload(&id, upload).await?;
        }

        let mut created_at = None;
        if desired.lifecycle.start {
            created_at = Some(Utc::now());
            self.runtime
                .start_container(&id)
                .await
                .context(StartSnafu { id: id.clone() })?;
            tracing::info!(container_id = %id, "container started");
        }

        if desired.lifecycle.attach {
            let logs = self.attach_and_wait(&id, desired.lifecycle.logs).await?;
            record.observed = Some(ObservedState {
                container_logs: logs,
                ..Default::default()
            });
        }

        self.read_after_create(record, created_at).await?;
        Ok(())
    }

    async fn ensure_image(&self, image: &str) -> Result<(), ReconcileError> {
        let present = self
            .runtime
            .image_exists(image)
            .await
            .context(ImageResolutionSnafu { image })?;
        if !present {
            tracing::info!(image, "pulling image");
            self.runtime
                .pull_image(image)
                .await
                .context(ImageResolutionSnafu { image })?;
        }
        Ok(())
    }

    /// Drop the default network, then connect each declared one.
    async fn attach_networks(
        &self,
        id: &ContainerId,
        networks: &[NetworkAttach],
    ) -> Result<(), ReconcileError> {
        if networks.is_empty() {
            return Ok(());
        }

        let default_network = NetworkId::new(self.settings.default_network.clone());
        match self
            .runtime
            .disconnect_from_network(id, &default_network, false)
            .await
        {
            Ok(()) => {}
            Err(NetworkError::NotConnected(_)) => {
                tracing::debug!(
                    container_id = %id,
                    network = %default_network,
                    "not attached to default network"
                );
            }
            Err(e) => {
                return Err(e).context(NetworkDisconnectSnafu {
                    network: default_network.to_string(),
                });
            }
        }

        for attach in networks {
            self.runtime
                .connect_to_network(id, &attach.network, &attach.endpoint)
                .await
                .context(NetworkConnectSnafu {
                    network: attach.network.to_string(),
                })?;
            tracing::debug!(container_id = %id, network = %attach.network, "connected network");
        }
        Ok(())
    }

    async fn upload(&self, id: &ContainerId, spec: &UploadSpec) -> Result<(), ReconcileError> {
        let archive = upload_archive(spec).context(ArchiveSnafu {
            file: spec.file.clone(),
        })?;
        self.runtime
            .copy_to_container(id, UPLOAD_ROOT, archive)
            .await
            .context(UploadSnafu {
                file: spec.file.clone(),
            })?;
        tracing::debug!(container_id = %id, file = %spec.file, "uploaded file");
        Ok(())
    }
}
