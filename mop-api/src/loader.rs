//! Definition-unit loader
//!
//! Pulls units out of an archive cache and installs them into a runtime.

use crate::config::RunConfig;
use crate::error::MopApiError;
use crate::unit::{literal, symbols, CompiledRef, DefinitionUnit, MethodDecl, SpecializerDecl};
use mop_cache::{Archive, ResourceCache, ResourceOpener};
use mop_config::TARGET_LOADER;
use mop_core::{
    Function, GenericFunctionRef, MethodSpec, MopError, Runtime, Specializer, Symbol,
};
use std::sync::Arc;

/// What one unit added to the runtime
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub unit: String,
    pub classes: Vec<Symbol>,
    pub generic_functions: Vec<Symbol>,
    pub methods: usize,
}

pub struct Loader<O: ResourceOpener<Resource = Archive>> {
    runtime: Arc<Runtime>,
    cache: ResourceCache<O>,
    config: RunConfig,
}

impl<O: ResourceOpener<Resource = Archive>> Loader<O> {
    /// Loader over a fresh runtime built with `config.limits`
    pub fn new(opener: O, config: RunConfig) -> Self {
        let runtime = Arc::new(Runtime::with_limits(config.limits.clone()));
        Self::with_runtime(runtime, opener, config)
    }

    pub fn with_runtime(runtime: Arc<Runtime>, opener: O, config: RunConfig) -> Self {
        Self {
            runtime,
            cache: ResourceCache::new(opener),
            config,
        }
    }

    pub fn runtime(&self) -> &Arc<Runtime> {
        &self.runtime
    }

    pub fn cache(&self) -> &ResourceCache<O> {
        &self.cache
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Acquire, decode and install one unit. The archive is released
    /// whether or not installation succeeds.
    pub fn load_unit(&self, name: &str) -> Result<LoadReport, MopApiError> {
        let archive = self.cache.acquire(name)?;
        let result = self.decode_and_install(&archive);
        self.cache.release(name);
        result.map_err(|err| MopApiError::in_unit(name, err))
    }

    /// Load units in order.
    ///
    /// With `stop_on_error` the first failure is returned; otherwise failed
    /// units are logged and skipped.
    pub fn load_all<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<LoadReport>, MopApiError> {
        let mut reports = Vec::with_capacity(names.len());
        for name in names {
            match self.load_unit(name.as_ref()) {
                Ok(report) => reports.push(report),
                Err(err) if !self.config.stop_on_error => {
                    tracing::error!(target: TARGET_LOADER, unit = name.as_ref(), error = %err, "unit skipped");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(reports)
    }

    fn decode_and_install(&self, archive: &Archive) -> Result<LoadReport, MopApiError> {
        let text = archive.text().map_err(|err| MopApiError::Decode {
            unit: archive.name().to_string(),
            line: None,
            column: None,
            message: err.to_string(),
        })?;
        let unit = DefinitionUnit::from_json(archive.name(), text)?;
        self.install(archive.name(), &unit)
    }

    /// Install a decoded unit: classes first, then generic functions, then
    /// methods. Class specializers may name classes not defined yet.
    pub fn install(&self, name: &str, unit: &DefinitionUnit) -> Result<LoadReport, MopApiError> {
        let mut report = LoadReport {
            unit: name.to_string(),
            ..LoadReport::default()
        };

        for decl in &unit.classes {
            let class = self.runtime.ensure_class(&decl.to_definition())?;
            tracing::debug!(target: TARGET_LOADER, unit = name, class = %class.describe(), "class installed");
            report.classes.push(Symbol::new(&decl.name));
        }

        for decl in &unit.generic_functions {
            let gf = self.runtime.ensure_documented_generic_function(
                Symbol::new(&decl.name),
                symbols(&decl.lambda_list),
                decl.documentation.clone(),
            )?;
            report.generic_functions.push(gf.name().clone());
        }

        for decl in &unit.methods {
            let gf = self.generic_function_for(decl)?;
            let spec = self.method_spec(name, decl)?;
            self.runtime.install_method(&gf, spec)?;
            report.methods += 1;
        }

        tracing::info!(
            target: TARGET_LOADER,
            unit = name,
            classes = report.classes.len(),
            generic_functions = report.generic_functions.len(),
            methods = report.methods,
            "unit loaded"
        );
        Ok(report)
    }

    /// The method's generic function, created from its lambda list if missing
    fn generic_function_for(&self, decl: &MethodDecl) -> Result<GenericFunctionRef, MopError> {
        let name = Symbol::new(&decl.generic_function);
        match self.runtime.find_generic_function(&name) {
            Some(gf) => Ok(gf),
            None => self
                .runtime
                .ensure_generic_function(name, symbols(&decl.lambda_list)),
        }
    }

    fn method_spec(&self, unit: &str, decl: &MethodDecl) -> Result<MethodSpec, MopApiError> {
        let specializers = decl
            .specializers
            .iter()
            .map(|spec| match spec {
                SpecializerDecl::Class(class) => self
                    .runtime
                    .class_reference(&Symbol::new(class))
                    .map(Specializer::Class)
                    .map_err(MopApiError::from),
                SpecializerDecl::Eql { eql } => {
                    literal(eql)
                        .map(Specializer::Eql)
                        .map_err(|message| MopApiError::Decode {
                            unit: unit.to_string(),
                            line: None,
                            column: None,
                            message,
                        })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let gf_name = Symbol::new(&decl.generic_function);
        let mut spec = MethodSpec::new(
            symbols(&decl.lambda_list),
            specializers,
            compiled(&gf_name, &decl.function),
        )
        .with_qualifiers(symbols(&decl.qualifiers));
        if let Some(fast) = &decl.fast_function {
            spec = spec.with_fast_function(compiled(&gf_name, fast));
        }
        if let Some(doc) = &decl.documentation {
            spec = spec.with_documentation(doc.clone());
        }
        Ok(spec)
    }
}

fn compiled(name: &Symbol, code: &str) -> Function {
    Function::new(Some(name.clone()), Arc::new(CompiledRef(code.to_string())))
}
