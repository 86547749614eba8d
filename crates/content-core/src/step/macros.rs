//! Macros utilitarias para reducir boilerplate al definir Artifacts y Steps
//! tipados.
//!
//! Exportadas en la raíz del crate:
//!   use content_core::{typed_artifact, typed_step};

/// Declara un Artifact tipado (struct serde camelCase + `ArtifactSpec`).
///
/// Formas soportadas:
/// - `typed_artifact!(Name { field: Ty, .. } schema: expr);`
/// - `typed_artifact!(Name { field: Ty, .. } schema: expr, validate(|me| body));`
///
/// Los campos aceptan atributos serde (p. ej. `#[serde(rename = "type")]`).
#[macro_export]
macro_rules! typed_artifact {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$fmeta:meta])* $fname:ident : $fty:ty),+ $(,)? }
        schema: $schema:expr,
        validate(|$me:ident| $vbody:block) $(,)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name { $($(#[$fmeta])* pub $fname: $fty,)+ }
        impl $crate::model::ArtifactSpec for $name {
            fn schema() -> $crate::schema::Schema { $schema }
            fn validate(&self) -> Result<(), String> {
                let $me = self;
                $vbody
            }
        }
    };
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$fmeta:meta])* $fname:ident : $fty:ty),+ $(,)? }
        schema: $schema:expr $(,)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name { $($(#[$fmeta])* pub $fname: $fty,)+ }
        impl $crate::model::ArtifactSpec for $name {
            fn schema() -> $crate::schema::Schema { $schema }
        }
    };
}

/// Declara un step tipado unitario. El cuerpo de `run` evalúa a
/// `Result<Output, CoreEngineError>`; un input ausente se reporta como
/// `CoreEngineError::MissingInputs` sin ejecutar el cuerpo.
#[macro_export]
macro_rules! typed_step {
    (
        $(#[$meta:meta])*
        step $name:ident {
            id: $id:expr,
            description: $desc:expr,
            kind: $kind:expr,
            input: $inp:ty,
            output: $out:ty,
            params: $params:ty,
            run($me:ident, $inp_ident:ident, $p_ident:ident) $body:block
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default)]
        pub struct $name;
        impl $name { pub fn new() -> Self { Self } }
        impl $crate::step::TypedStep for $name {
            type Params = $params;
            type Input = $inp;
            type Output = $out;
            fn id(&self) -> &'static str { $id }
            fn description(&self) -> &'static str { $desc }
            fn kind(&self) -> $crate::step::StepKind { $kind }
            #[allow(unused_variables)]
            fn run_typed(&self, input: Option<Self::Input>, $p_ident: Self::Params) -> $crate::step::StepRunResultTyped<Self::Output> {
                let $me = self;
                let Some($inp_ident) = input else {
                    return $crate::step::StepRunResultTyped::Failure { error: $crate::errors::CoreEngineError::MissingInputs };
                };
                let out: Result<Self::Output, $crate::errors::CoreEngineError> = $body;
                out.into()
            }
        }
    };
}
