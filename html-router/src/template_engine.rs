use std::sync::Arc;

use image_search::Query;
use minijinja::{Environment, Error, Value};
#[cfg(debug_assertions)]
use minijinja_autoreload::AutoReloader;

pub trait ProvidesTemplateEngine {
    fn template_engine(&self) -> &Arc<TemplateEngine>;
}

/// Renders the search pages under `html-router/templates`.
///
/// Debug builds read the directory from disk and pick up edits without a
/// restart. Release builds use the copies `build.rs` embedded.
#[derive(Clone)]
pub struct TemplateEngine {
    #[cfg(debug_assertions)]
    reloader: Arc<AutoReloader>,
    #[cfg(not(debug_assertions))]
    env: Arc<Environment<'static>>,
}

/// Filters and globals every page can rely on.
fn register_page_globals(env: &mut Environment<'_>) {
    minijinja_contrib::add_to_environment(env);
    // The form's maxlength mirrors the server-side limit
    env.add_global("max_query_len", Query::MAX_LEN);
}

impl TemplateEngine {
    #[cfg(debug_assertions)]
    pub fn new() -> Self {
        let template_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates");
        let reloader = AutoReloader::new(move |notifier| {
            let mut env = Environment::new();
            env.set_loader(minijinja::path_loader(&template_dir));
            notifier.set_fast_reload(true);
            notifier.watch_path(&template_dir, true);
            register_page_globals(&mut env);
            Ok(env)
        });

        Self {
            reloader: Arc::new(reloader),
        }
    }

    #[cfg(not(debug_assertions))]
    pub fn new() -> Self {
        let mut env = Environment::new();
        minijinja_embed::load_templates!(&mut env);
        register_page_globals(&mut env);

        Self { env: Arc::new(env) }
    }

    fn with_env<R>(
        &self,
        f: impl FnOnce(&Environment<'static>) -> Result<R, Error>,
    ) -> Result<R, Error> {
        #[cfg(debug_assertions)]
        {
            let env = self.reloader.acquire_env()?;
            f(&env)
        }
        #[cfg(not(debug_assertions))]
        {
            f(&self.env)
        }
    }

    pub fn render(&self, name: &str, ctx: &Value) -> Result<String, Error> {
        self.with_env(|env| env.get_template(name)?.render(ctx))
    }

    /// Renders one block of a page, e.g. the `search_area` htmx swaps in.
    pub fn render_block(
        &self,
        template_name: &str,
        block_name: &str,
        ctx: &Value,
    ) -> Result<String, Error> {
        self.with_env(|env| {
            env.get_template(template_name)?
                .eval_to_state(ctx)?
                .render_block(block_name)
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}
