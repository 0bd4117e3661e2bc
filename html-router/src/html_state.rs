use crate::template_engine::{ProvidesTemplateEngine, TemplateEngine};
use image_search::ImageSearchProvider;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct HtmlState {
    pub templates: Arc<TemplateEngine>,
    pub image_search: Arc<dyn ImageSearchProvider>,
}

impl HtmlState {
    pub fn new_with_resources(image_search: Arc<dyn ImageSearchProvider>) -> Self {
        let templates = Arc::new(TemplateEngine::new());
        debug!("Template engine configured for html_router.");

        Self {
            templates,
            image_search,
        }
    }
}

impl ProvidesTemplateEngine for HtmlState {
    fn template_engine(&self) -> &Arc<TemplateEngine> {
        &self.templates
    }
}
