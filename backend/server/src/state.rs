use std::sync::Arc;

use super::{
    config::Config,
    database::{DatabaseError, Datastore, Supabase},
};

pub struct AppState {
    pub config: Config,
    pub datastore: Arc<dyn Datastore>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Arc<Self>, DatabaseError> {
        let datastore = Supabase::new(
            &config.supabase_url,
            &config.supabase_key,
            config.datastore_timeout,
        )?;

        Ok(Self::with_datastore(config, Arc::new(datastore)))
    }

    pub fn with_datastore(config: Config, datastore: Arc<dyn Datastore>) -> Arc<Self> {
        Arc::new(Self { config, datastore })
    }
}
