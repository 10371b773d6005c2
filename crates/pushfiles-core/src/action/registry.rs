use log::*;
use std::collections::BTreeMap;

use crate::{
    action::{ActionContext, TemplateAction},
    error::{PushFilesError, Result},
};

/// Actions available to a host, keyed by id.
#[derive(Default)]
pub struct ActionRegistry {
    actions: BTreeMap<String, Box<dyn TemplateAction>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action. Ids must be unique.
    pub fn add_action(
        &mut self,
        action: Box<dyn TemplateAction>,
    ) -> Result<()> {
        let id = action.id().to_string();

        if self.actions.contains_key(&id) {
            return Err(PushFilesError::DuplicateAction(id));
        }

        debug!("registering action: {id}");
        self.actions.insert(id, action);

        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&dyn TemplateAction> {
        self.actions.get(id).map(|a| &**a)
    }

    /// Registered action ids in sorted order.
    pub fn ids(&self) -> Vec<String> {
        self.actions.keys().cloned().collect()
    }

    pub fn actions(&self) -> impl Iterator<Item = &dyn TemplateAction> {
        self.actions.values().map(|a| &**a)
    }

    /// Run the action registered under `id`.
    pub async fn execute(&self, id: &str, ctx: ActionContext) -> Result<()> {
        let action = self
            .get(id)
            .ok_or_else(|| PushFilesError::UnknownAction(id.to_string()))?;

        info!("running action: {id}");
        action.handler(ctx).await
    }
}
