//! End-to-end tests for building stage sequences from configuration.

#[cfg(test)]
mod tests {
    use crate::config::{GeneralSettings, SequenceConfig, StageDescriptions};
    use crate::errors::FastflowError;
    use crate::registry::{InMemoryModuleLoader, Namespace, TypeResolver};
    use crate::sequence::{sequence_from_dict, SequenceBuilder};
    use crate::stages::{Stage, StageArgs};
    use crate::testing::{
        as_recording, capture_logs, failing_factory, recorded_args, recording_resolver,
        RecordingStage,
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    fn resolver() -> TypeResolver {
        recording_resolver(
            &[
                ("mymod", &["Foo", "Hist"][..]),
                ("pkg.mod", &["Baz"][..]),
            ],
            &["Bar", "Foo"],
        )
    }

    fn object(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
        value.as_object().cloned().unwrap()
    }

    fn description_error(err: FastflowError) -> crate::errors::BadStagesDescriptionError {
        match err {
            FastflowError::BadStagesDescription(inner) => inner,
            other => panic!("expected BadStagesDescription, got {other:?}"),
        }
    }

    #[test]
    fn test_keyed_stage_from_backend_module() {
        let general = GeneralSettings::new().with_backend("mymod");
        let descriptions = StageDescriptions::new().with("a", json!({"x": 1}));
        let cwd = std::env::current_dir().unwrap();

        let stages =
            sequence_from_dict(&json!([{"a": "Foo"}]), &general, &descriptions, &resolver())
                .unwrap();

        assert_eq!(stages.len(), 1);
        let stage = as_recording(stages[0].as_ref());
        assert_eq!(stage.type_name(), "Foo");
        assert_eq!(
            stage.args(),
            &StageArgs::keyed(object(json!({
                "x": 1,
                "name": "a",
                "out_dir": cwd.to_string_lossy(),
            })))
        );
    }

    #[test]
    fn test_positional_stage_from_builtin_namespace() {
        let descriptions = StageDescriptions::new().with("b", json!([1, 2, 3]));

        let stages = sequence_from_dict(
            &json!([{"b": "Bar"}]),
            &GeneralSettings::default(),
            &descriptions,
            &resolver(),
        )
        .unwrap();

        assert_eq!(stages.len(), 1);
        assert_eq!(as_recording(stages[0].as_ref()).type_name(), "Bar");
        assert_eq!(
            recorded_args(stages[0].as_ref()),
            &StageArgs::positional(vec![json!(1), json!(2), json!(3)])
        );
        assert_eq!(stages[0].name(), None);
    }

    #[test]
    fn test_scalar_stage_from_dotted_tag() {
        let descriptions = StageDescriptions::new().with("c", json!(5));

        let stages = sequence_from_dict(
            &json!([{"c": "pkg.mod.Baz"}]),
            &GeneralSettings::default(),
            &descriptions,
            &resolver(),
        )
        .unwrap();

        assert_eq!(as_recording(stages[0].as_ref()).type_name(), "Baz");
        assert_eq!(recorded_args(stages[0].as_ref()), &StageArgs::scalar(json!(5), "c"));
    }

    #[test]
    fn test_output_order_matches_stage_list() {
        let stages = SequenceBuilder::new(resolver())
            .with_backend("mymod")
            .with_output_dir("/results")
            .description("third", json!({}))
            .description("first", json!([0]))
            .description("second", json!("cfg"))
            .build(&json!([
                {"first": "Foo"},
                {"second": "Hist"},
                {"third": "pkg.mod.Baz"},
            ]))
            .unwrap();

        let types: Vec<_> = stages
            .iter()
            .map(|s| as_recording(s.as_ref()).type_name().to_string())
            .collect();
        assert_eq!(types, vec!["Foo", "Hist", "Baz"]);
        assert_eq!(recorded_args(stages[2].as_ref()).get("out_dir"), Some(&json!("/results")));
    }

    #[test]
    fn test_empty_stage_list() {
        let stages = SequenceBuilder::new(resolver()).build(&json!([])).unwrap();
        assert!(stages.is_empty());
    }

    #[test]
    fn test_backend_shadows_builtin_for_bare_tags() {
        // "Foo" lives in both the builtin namespace and mymod; "Bar" only in builtin.
        let builder = SequenceBuilder::new(resolver())
            .with_backend("mymod")
            .description("a", json!(1));

        assert!(builder.build(&json!([{"a": "Foo"}])).is_ok());
        let err = builder.build(&json!([{"a": "Bar"}])).err().unwrap();
        assert_eq!(description_error(err).message, "Unknown type for stage 'a': Bar");
    }

    #[test]
    fn test_stage_list_must_be_sequence() {
        let builder = SequenceBuilder::new(resolver()).description("a", json!(1));

        for stages in [json!({"a": "Foo"}), json!("a"), json!(null)] {
            let err = builder.build(&stages).err().unwrap();
            assert!(matches!(err, FastflowError::BadStageList(_)), "{stages}");
            assert!(err.is_bad_config());
        }
    }

    #[test]
    fn test_entry_shape_errors() {
        let builder = SequenceBuilder::new(resolver()).description("a", json!(1));

        for entry in [
            json!("Foo"),
            json!({}),
            json!({"a": "Foo", "b": "Bar"}),
            json!({"a": ["Foo"]}),
        ] {
            let err = builder.build(&json!([entry])).err().unwrap();
            assert!(matches!(err, FastflowError::BadStagesDescription(_)), "{entry}");
        }
    }

    #[test]
    fn test_missing_description_names_stage() {
        let err = SequenceBuilder::new(resolver())
            .description("present", json!(1))
            .build(&json!([{"present": "Bar"}, {"absent": "Bar"}]))
            .err()
            .unwrap();

        let err = description_error(err);
        assert_eq!(err.message, "Missing description for stage 'absent'");
        assert_eq!(err.stage.as_deref(), Some("absent"));
    }

    #[test]
    fn test_null_description_counts_as_missing() {
        let err = SequenceBuilder::new(resolver())
            .description("a", serde_json::Value::Null)
            .build(&json!([{"a": "Bar"}]))
            .err()
            .unwrap();

        assert_eq!(description_error(err).message, "Missing description for stage 'a'");
    }

    #[test]
    fn test_first_error_aborts_sequence() {
        let calls = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = calls.clone();
        let counting = crate::stages::stage_factory(move |args| {
            counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(RecordingStage::new("Counted", args))
        });
        let loader = InMemoryModuleLoader::new()
            .with_module(Namespace::new("m").with_stage("Counted", counting));
        let resolver = TypeResolver::new(Arc::new(loader));

        let result = SequenceBuilder::new(resolver)
            .with_backend("m")
            .description("a", json!(1))
            .description("c", json!(1))
            .build(&json!([{"a": "Counted"}, {"b": 7}, {"c": "Counted"}]));

        assert!(result.is_err());
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unknown_backend_module_propagates() {
        let err = SequenceBuilder::new(resolver())
            .with_backend("no.such.module")
            .build(&json!([]))
            .err()
            .unwrap();

        match err {
            FastflowError::ModuleLoad(inner) => assert_eq!(inner.module, "no.such.module"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_dotted_module_propagates() {
        let err = SequenceBuilder::new(resolver())
            .description("a", json!(1))
            .build(&json!([{"a": "other.pkg.Thing"}]))
            .err()
            .unwrap();

        assert!(matches!(err, FastflowError::ModuleLoad(ref inner) if inner.module == "other.pkg"));
    }

    #[test]
    fn test_constructor_error_propagates() {
        let loader = InMemoryModuleLoader::new()
            .with_module(Namespace::new("m").with_stage("Broken", failing_factory("bins must be > 0")));
        let resolver = TypeResolver::new(Arc::new(loader));

        let err = SequenceBuilder::new(resolver)
            .description("a", json!({"bins": 0}))
            .build(&json!([{"a": "m.Broken"}]))
            .err()
            .unwrap();

        assert!(matches!(err, FastflowError::StageConstruction(_)));
        assert_eq!(err.to_string(), "bins must be > 0");
    }

    #[test]
    fn test_failures_are_logged_at_error_level() {
        let builder = SequenceBuilder::new(resolver()).description("a", json!(1));

        let (result, logs) = capture_logs(|| builder.build(&json!({"a": "Foo"})));
        assert!(result.is_err());
        assert_eq!(logs.error_count(), 1);
        assert!(logs.contains("Bad stage list: Should be a list"));

        let (result, logs) = capture_logs(|| builder.build(&json!([{"a": "Nope"}])));
        assert!(result.is_err());
        assert_eq!(logs.error_count(), 1);
        assert!(logs.contains("Unknown type for stage 'a': Nope"));

        let (result, logs) = capture_logs(|| builder.build(&json!([{"missing": "Foo"}])));
        assert!(result.is_err());
        assert!(logs.contains("Missing description for stage 'missing'"));
    }

    #[test]
    fn test_success_logs_no_errors() {
        let builder = SequenceBuilder::new(resolver()).description("a", json!(1));

        let (result, logs) = capture_logs(|| builder.build(&json!([{"a": "Foo"}])));
        assert_eq!(result.unwrap().len(), 1);
        assert_eq!(logs.error_count(), 0);
        assert!(logs.contains("Constructing stage"));
    }

    #[test]
    fn test_yaml_document_matches_direct_call() {
        let config = SequenceConfig::from_yaml_str(
            r"
general:
  backend: mymod
  output_dir: /out
stages:
  - a: Foo
  - b: Bar
  - c: pkg.mod.Baz
a: {x: 1}
b: [1, 2, 3]
c: 5
",
        )
        .unwrap();
        let resolver = resolver();

        // "Bar" is builtin only, so the bare tag misses once a backend is set.
        assert!(config.build(&resolver).is_err());

        let config = SequenceConfig {
            stages: json!([{"a": "Foo"}, {"b": "mymod.Hist"}, {"c": "pkg.mod.Baz"}]),
            ..config
        };
        let direct = sequence_from_dict(
            &config.stages,
            &config.general,
            &config.descriptions,
            &resolver,
        )
        .unwrap();
        let from_document = config.build(&resolver).unwrap();

        let summarize = |stages: &[Box<dyn Stage>]| -> Vec<(String, StageArgs)> {
            stages
                .iter()
                .map(|s| {
                    let rec = as_recording(s.as_ref());
                    (rec.type_name().to_string(), rec.args().clone())
                })
                .collect()
        };
        assert_eq!(summarize(&direct), summarize(&from_document));
        assert_eq!(
            summarize(&direct)[0].1,
            StageArgs::keyed(object(json!({"x": 1, "name": "a", "out_dir": "/out"})))
        );
    }
}
