//! Rhai engine wrapper with script caching

use crate::config::AssetConfig;
use crate::context::SimContext;
use crate::scripting::modules::register_all_modules;
use rhai::{Dynamic, Engine, EvalAltResult, Scope, AST};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

/// Script engine with the simulation API registered and compiled scripts cached
pub struct ScriptEngine {
    /// The Rhai engine instance
    pub engine: Arc<Engine>,
    /// Cache of compiled scripts
    cache: RwLock<HashMap<String, AST>>,
    /// Asset configuration for loading scripts
    asset_config: AssetConfig,
    context: Arc<SimContext>,
}

impl ScriptEngine {
    /// Create a script engine bound to `context` with default asset paths
    pub fn new(context: Arc<SimContext>) -> Self {
        Self::with_config(AssetConfig::default(), context)
    }

    /// Create a script engine with custom asset configuration
    pub fn with_config(asset_config: AssetConfig, context: Arc<SimContext>) -> Self {
        let mut engine = Engine::new();

        // Configure engine for safety
        engine.set_max_expr_depths(100, 100);
        engine.set_max_call_levels(50);
        engine.set_max_operations(100_000);
        engine.set_max_string_size(10_000);
        engine.set_max_array_size(10_000);
        engine.set_max_map_size(1_000);

        // Disable certain features for safety
        engine.disable_symbol("eval");

        register_all_modules(&mut engine, context.clone());

        Self {
            engine: Arc::new(engine),
            cache: RwLock::new(HashMap::new()),
            asset_config,
            context,
        }
    }

    /// Context whose world and entity factory scripts operate on
    pub fn context(&self) -> &Arc<SimContext> {
        &self.context
    }

    /// Load and compile a script by name using the configured asset path
    pub fn load_script_by_name(&self, script_name: &str) -> Result<(), Box<EvalAltResult>> {
        let script_path = self
            .asset_config
            .script_path(script_name)
            .map_err(|e| e.to_string())?;
        self.load_script(script_name, script_path)
    }

    /// Load and compile a script from a file path
    ///
    /// A script already cached under `script_name` is not reloaded.
    pub fn load_script<P: AsRef<Path>>(
        &self,
        script_name: &str,
        script_path: P,
    ) -> Result<(), Box<EvalAltResult>> {
        let script_path = script_path.as_ref();
        debug!(script_name, path = ?script_path, "Loading script");

        if self.is_loaded(script_name) {
            debug!(script_name, "Script already cached");
            return Ok(());
        }

        let script_content = std::fs::read_to_string(script_path)
            .map_err(|e| format!("Failed to read script file '{}': {e}", script_path.display()))?;

        let ast = self.engine.compile(&script_content).map_err(|e| {
            let position = e.position();
            format!(
                "{}:{}:{} - {}",
                script_path.display(),
                position.line().unwrap_or(0),
                position.position().unwrap_or(0),
                e
            )
        })?;

        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(script_name.to_string(), ast);

        Ok(())
    }

    /// Run a cached script and return the value of its last statement
    pub fn run_script(&self, script_name: &str) -> Result<Dynamic, Box<EvalAltResult>> {
        let ast = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(script_name)
            .cloned()
            .ok_or_else(|| format!("Script '{script_name}' is not loaded"))?;

        info!(script_name, "Running script");
        let mut scope = Scope::new();
        self.engine
            .eval_ast_with_scope::<Dynamic>(&mut scope, &ast)
            .map_err(|e| -> Box<EvalAltResult> {
                debug!(script_name, error = ?e, "Script error");
                let position = e.position();
                format!(
                    "{}:{}:{} - {}",
                    script_name,
                    position.line().unwrap_or(0),
                    position.position().unwrap_or(0),
                    e
                )
                .into()
            })
    }

    /// Compile and evaluate source text without caching it
    pub fn eval<T: Clone + Send + Sync + 'static>(
        &self,
        source: &str,
    ) -> Result<T, Box<EvalAltResult>> {
        self.engine.eval::<T>(source)
    }

    /// Check if a script is loaded in the cache
    pub fn is_loaded(&self, script_name: &str) -> bool {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(script_name)
    }

    /// Clear the script cache
    pub fn clear_cache(&self) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Get the number of cached scripts
    pub fn cache_size(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
