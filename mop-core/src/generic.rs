//! Generic functions: named collections of methods.
//!
//! Only method bookkeeping lives here. Dispatch and method combination are
//! the evaluator's business.

use crate::error::{MopError, MopResult};
use crate::method::{MethodObject, Specializer};
use crate::symbol::Symbol;
use mop_config::TARGET_METHOD;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

pub type GenericFunctionRef = Arc<GenericFunction>;

pub struct GenericFunction {
    name: Symbol,
    lambda_list: Vec<Symbol>,
    documentation: Option<String>,
    methods: RwLock<Vec<MethodObject>>,
}

impl GenericFunction {
    pub fn new(name: Symbol, lambda_list: Vec<Symbol>) -> GenericFunctionRef {
        Self::with_documentation(name, lambda_list, None)
    }

    pub fn with_documentation(
        name: Symbol,
        lambda_list: Vec<Symbol>,
        documentation: Option<String>,
    ) -> GenericFunctionRef {
        Arc::new(Self {
            name,
            lambda_list,
            documentation,
            methods: RwLock::new(Vec::new()),
        })
    }

    pub fn name(&self) -> &Symbol {
        &self.name
    }

    pub fn lambda_list(&self) -> &[Symbol] {
        &self.lambda_list
    }

    pub fn documentation(&self) -> Option<&str> {
        self.documentation.as_deref()
    }

    /// Required parameters: those before the first `&` keyword
    pub fn required_count(&self) -> usize {
        required_count(&self.lambda_list)
    }

    pub fn methods(&self) -> Vec<MethodObject> {
        self.methods.read().clone()
    }

    pub fn method_count(&self) -> usize {
        self.methods.read().len()
    }

    /// Add `method`, replacing any method with the same qualifiers and
    /// specializers. Returns the replaced method.
    pub fn add_method(&self, method: MethodObject) -> MopResult<Option<MethodObject>> {
        let specializers = method.specializers()?;
        let qualifiers = method.qualifiers()?;
        let expected = self.required_count();
        if specializers.len() != expected {
            return Err(MopError::IncongruentLambdaList {
                generic_function: self.name.clone(),
                expected,
                actual: specializers.len(),
            });
        }

        let mut methods = self.methods.write();
        let mut existing = None;
        for (i, candidate) in methods.iter().enumerate() {
            if same_signature(candidate, &qualifiers, &specializers)? {
                existing = Some(i);
                break;
            }
        }

        let replaced = match existing {
            Some(i) => Some(std::mem::replace(&mut methods[i], method)),
            None => {
                methods.push(method);
                None
            }
        };
        tracing::debug!(
            target: TARGET_METHOD,
            generic_function = %self.name,
            methods = methods.len(),
            replaced = replaced.is_some(),
            "method added"
        );
        Ok(replaced)
    }

    /// Remove `method` by identity; false if it was not present
    pub fn remove_method(&self, method: &MethodObject) -> bool {
        let mut methods = self.methods.write();
        let before = methods.len();
        methods.retain(|m| !m.ptr_eq(method));
        before != methods.len()
    }

    pub fn find_method(
        &self,
        qualifiers: &[Symbol],
        specializers: &[Specializer],
    ) -> MopResult<Option<MethodObject>> {
        for method in self.methods.read().iter() {
            if same_signature(method, qualifiers, specializers)? {
                return Ok(Some(method.clone()));
            }
        }
        Ok(None)
    }

    pub fn describe(&self) -> String {
        format!("#<STANDARD-GENERIC-FUNCTION {}>", self.name)
    }
}

pub(crate) fn required_count(lambda_list: &[Symbol]) -> usize {
    lambda_list
        .iter()
        .take_while(|param| !param.name().starts_with('&'))
        .count()
}

fn same_signature(
    method: &MethodObject,
    qualifiers: &[Symbol],
    specializers: &[Specializer],
) -> MopResult<bool> {
    if method.qualifiers()? != qualifiers {
        return Ok(false);
    }
    let theirs = method.specializers()?;
    Ok(theirs.len() == specializers.len()
        && theirs.iter().zip(specializers).all(|(a, b)| a.same_as(b)))
}

impl fmt::Debug for GenericFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
