use crate::modules::payments::adapters::outbound::payments_in_memory::InMemoryPayments;
use crate::modules::payments::use_cases::capture_payment::handler::CapturePaymentHandler;
use crate::modules::payments::use_cases::get_payment::inbound::graphql::PaymentsData;
use crate::modules::uploads::use_cases::upload_image::handler::UploadImageHandler;
use crate::shared::infrastructure::media_store::cloudinary::CloudinaryMediaStore;
use crate::shared::infrastructure::media_store::in_memory::InMemoryMediaStore;
use crate::shared::infrastructure::media_store::{MediaStore, MediaStoreError};
use crate::shared::infrastructure::query_armor::{ArmorLimits, QueryArmor};
use crate::shell::config::{AppConfig, RuntimeMode};
use crate::shell::graphql::{AppSchema, build_schema};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub schema: AppSchema,
    pub armor: Arc<QueryArmor>,
    pub capture_handler: Arc<CapturePaymentHandler<InMemoryPayments>>,
    pub upload_handler: Arc<UploadImageHandler>,
    pub runtime_mode: RuntimeMode,
}

impl AppState {
    pub fn new(
        runtime_mode: RuntimeMode,
        webhook_secret: &str,
        admin_token: Option<String>,
        payments: Arc<InMemoryPayments>,
        media: Arc<dyn MediaStore>,
    ) -> Self {
        let schema = build_schema(PaymentsData {
            queries: payments.clone(),
            admin_token,
        });
        Self {
            schema,
            armor: Arc::new(QueryArmor::new(
                ArmorLimits::default(),
                runtime_mode.is_development(),
            )),
            capture_handler: Arc::new(CapturePaymentHandler::new(webhook_secret, payments)),
            upload_handler: Arc::new(UploadImageHandler::new(media)),
            runtime_mode,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, MediaStoreError> {
        let media: Arc<dyn MediaStore> = match &config.cloudinary {
            Some(credentials) => {
                tracing::info!(cloud = %credentials.cloud_name, "uploads go to Cloudinary");
                Arc::new(CloudinaryMediaStore::new(credentials.clone())?)
            }
            None => {
                tracing::warn!("Cloudinary credentials missing, uploads are kept in memory");
                Arc::new(InMemoryMediaStore::new())
            }
        };
        Ok(Self::new(
            config.runtime_mode,
            &config.webhook_secret,
            config.admin_token.clone(),
            Arc::new(InMemoryPayments::new()),
            media,
        ))
    }
}
