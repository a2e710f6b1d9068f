use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::propagation::{Propagator, TleLoader};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub tle_loader: Arc<RwLock<TleLoader>>,
    pub propagator: Arc<dyn Propagator>,
}
