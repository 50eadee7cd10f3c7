use std::sync::Arc;

use uuid::Uuid;

use crate::api::ApiClient;
use crate::auth::dto::User;
use crate::foods::dto::Food;

/// Everything the client keeps between actions: the API handle, the
/// authenticated session and the food catalog cache. Mutated only on the
/// event loop; views read through the accessors.
pub struct AppState {
    api: Arc<dyn ApiClient>,
    session: Option<User>,
    catalog: Vec<Food>,
}

impl AppState {
    pub fn new(api: Arc<dyn ApiClient>) -> Self {
        Self {
            api,
            session: None,
            catalog: Vec::new(),
        }
    }

    pub fn api(&self) -> &dyn ApiClient {
        self.api.as_ref()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn set_session(&mut self, user: User) {
        self.session = Some(user);
    }

    /// Dropping the session drops the catalog cache with it.
    pub fn clear_session(&mut self) {
        self.session = None;
        self.catalog.clear();
    }

    pub fn catalog(&self) -> &[Food] {
        &self.catalog
    }

    pub fn replace_catalog(&mut self, foods: Vec<Food>) {
        self.catalog = foods;
    }

    pub fn find_food(&self, id: Uuid) -> Option<&Food> {
        self.catalog.iter().find(|f| f.id == id)
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        Self::new(Arc::new(fake::FakeApi::new()))
    }

    /// Like `fake()`, but keeps a handle to the fake backend so a test can
    /// flip it into outage mode.
    #[cfg(test)]
    pub fn fake_with_handle() -> (Self, Arc<fake::FakeApi>) {
        let api = Arc::new(fake::FakeApi::new());
        (Self::new(api.clone()), api)
    }
}
