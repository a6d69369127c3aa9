//! Stage trait and stage factories.
//!
//! Stages are the objects a sequence configuration produces. This crate never
//! runs them; it only resolves a factory by name and calls it with the
//! arguments taken from the stage's description.

mod args;

pub use args::StageArgs;

use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

/// Trait for constructed stages.
///
/// The only contract this crate places on a stage is that it exists. The
/// accessors below let callers inspect and downcast what they got back.
pub trait Stage: Send + Sync + Debug {
    /// Returns the stage name, if the stage keeps one.
    fn name(&self) -> Option<&str> {
        None
    }

    /// Returns the stage as [`Any`] for downcasting to its concrete type.
    fn as_any(&self) -> &dyn Any;
}

/// Factory function type for constructing stages from their arguments.
pub type StageFactory = Arc<dyn Fn(StageArgs) -> anyhow::Result<Box<dyn Stage>> + Send + Sync>;

/// Wraps a closure returning a concrete stage type into a [`StageFactory`].
pub fn stage_factory<S, F>(func: F) -> StageFactory
where
    S: Stage + 'static,
    F: Fn(StageArgs) -> anyhow::Result<S> + Send + Sync + 'static,
{
    Arc::new(move |args| func(args).map(|stage| Box::new(stage) as Box<dyn Stage>))
}

/// Builds a factory that deserializes the stage from its arguments.
///
/// Keyed arguments deserialize as a struct, positional arguments as a tuple
/// or tuple struct. See [`StageArgs::parse`] for the scalar convention.
pub fn deserialize_factory<S>() -> StageFactory
where
    S: Stage + serde::de::DeserializeOwned + 'static,
{
    stage_factory(|args: StageArgs| Ok(args.parse::<S>()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Binned {
        name: String,
        bins: u32,
    }

    impl Stage for Binned {
        fn name(&self) -> Option<&str> {
            Some(&self.name)
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[derive(Debug, Deserialize)]
    struct Pair(i64, i64);

    impl Stage for Pair {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_stage_factory_boxes_stage() {
        let factory = stage_factory(|args: StageArgs| {
            Ok(Binned {
                name: args.name().unwrap_or_default().to_string(),
                bins: 3,
            })
        });

        let stage = factory(StageArgs::scalar(serde_json::json!(1), "hist")).unwrap();
        assert_eq!(stage.name(), Some("hist"));
        assert_eq!(stage.as_any().downcast_ref::<Binned>().unwrap().bins, 3);
    }

    #[test]
    fn test_deserialize_factory_keyed() {
        let factory = deserialize_factory::<Binned>();
        let fields = serde_json::json!({"name": "hist", "bins": 10});
        let stage = factory(StageArgs::keyed(fields.as_object().unwrap().clone())).unwrap();

        let binned = stage.as_any().downcast_ref::<Binned>().unwrap();
        assert_eq!(binned.name, "hist");
        assert_eq!(binned.bins, 10);
    }

    #[test]
    fn test_deserialize_factory_positional() {
        let factory = deserialize_factory::<Pair>();
        let stage = factory(StageArgs::positional(vec![
            serde_json::json!(4),
            serde_json::json!(7),
        ]))
        .unwrap();

        let pair = stage.as_any().downcast_ref::<Pair>().unwrap();
        assert_eq!((pair.0, pair.1), (4, 7));
    }

    #[test]
    fn test_deserialize_factory_reports_bad_arguments() {
        let factory = deserialize_factory::<Binned>();
        let result = factory(StageArgs::positional(vec![serde_json::json!("x")]));
        assert!(result.is_err());
    }
}
