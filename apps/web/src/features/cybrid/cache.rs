use crate::{
    app_lib::{storage::LocalStorageBackend, AppError},
    features::cybrid::client,
};
use admin_session::SessionBackend;
use dashboard_model::cybrid::{CustomerIdMapping, CustomerMappings, MAPPINGS_KEY};
use tracing::{debug, warn};

pub fn load() -> CustomerMappings {
    CustomerMappings::from_json(LocalStorageBackend.read(MAPPINGS_KEY).as_deref())
}

fn remember(mapping: CustomerIdMapping) -> CustomerMappings {
    let mut mappings = load();
    mappings.upsert(mapping);
    match mappings.to_json() {
        Ok(json) => {
            if let Err(err) = LocalStorageBackend.write(MAPPINGS_KEY, &json) {
                warn!("failed to cache customer mapping: {err}");
            }
        }
        Err(err) => warn!("failed to encode customer mappings: {err}"),
    }
    mappings
}

/// The cached mapping for `user_id`, looked up from the backend on a miss.
pub async fn resolve(user_id: &str) -> Result<CustomerIdMapping, AppError> {
    if let Some(mapping) = load().get(user_id) {
        debug!(user_id, "customer id served from cache");
        return Ok(mapping.clone());
    }
    let mapping = client::fetch_customer_id(user_id).await?;
    remember(mapping.clone());
    Ok(mapping)
}
