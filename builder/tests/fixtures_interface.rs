use std::path::PathBuf;

use interface_dita_builder::{
    BuildConfig, Diagnostic, InterfaceModel, build_interface, load_interface,
};
use interface_dita_core::{
    ArgumentKind, ClassInstance, Entry, EntryGroup, Inheritance, MemberRole, Relation, Setting,
    validate_table,
};

#[test]
fn test_environment_scenario_builds_pair_and_relation() {
    let model = fixture_model();

    let start = model.commands.get("startsection").expect("begin command");
    let stop = model.commands.get("stopsection").expect("end command");
    assert_eq!(start.arguments.len(), 1);
    assert_eq!(start.arguments[0].kind, ArgumentKind::Settings);
    assert!(stop.arguments.is_empty());
    assert_eq!(stop.instance_of.as_ref().map(|i| i.role), Some(MemberRole::End));

    let environment = model.environments().next().expect("environment relation");
    assert_eq!(environment.stem, "section");
    assert_eq!(environment.members(), ["startsection", "stopsection"]);
}

#[test]
fn test_class_scenario_builds_instances() {
    let model = fixture_model();

    assert!(model.commands.contains("placefigure"));
    assert!(model.commands.contains("placetable"));
    assert!(!model.commands.contains("placefloat"));

    let class = model.classes().next().expect("class relation");
    assert_eq!(class.name, "placefloat");
    assert_eq!(
        class.instances,
        vec![
            ClassInstance::Command("placefigure".to_string()),
            ClassInstance::Command("placetable".to_string()),
        ]
    );

    let figure = model.commands.get("placefigure").unwrap();
    let kinds: Vec<_> = figure.arguments.iter().map(|a| a.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            ArgumentKind::Options,
            ArgumentKind::Placeholder("REFERENCE".to_string()),
            ArgumentKind::Scope,
        ]
    );
    assert_eq!(
        figure.arguments[0].options(),
        &[Entry::Inherit(Inheritance::new("location", EntryGroup::Options))]
    );
}

#[test]
fn test_donor_counts_are_recorded() {
    let model = fixture_model();

    assert_eq!(model.commands.donor_count("location", EntryGroup::Options), Some(3));
    assert_eq!(model.commands.donor_count("setupalign", EntryGroup::Options), Some(1));
    assert_eq!(model.commands.donor_count("setupframed", EntryGroup::Settings), Some(2));
    assert_eq!(
        model.donors.iter().collect::<Vec<_>>(),
        vec!["location", "setupalign", "setupframed"]
    );
}

#[test]
fn test_setting_inheritance_and_unknown_argument() {
    let model = fixture_model();
    let command = model.commands.get("setupfoo").unwrap();

    assert!(command.is_system);
    assert_eq!(command.arguments[1].kind, ArgumentKind::Delimiter);
    assert_eq!(command.arguments[1].name.as_deref(), Some("to"));
    assert_eq!(
        command.arguments[2].settings(),
        &[Setting::Inherit(Inheritance::new("setupframed", EntryGroup::Settings))]
    );
    assert_eq!(command.arguments[3].kind, ArgumentKind::Unresolved);
    assert!(model.report.diagnostics.contains(&Diagnostic::UnknownArgument {
        command: "setupfoo".to_string(),
        tag: "gizmo".to_string(),
    }));
}

#[test]
fn test_duplicates_and_variants() {
    let model = fixture_model();

    assert!(!model.commands.get("thinspace").unwrap().is_system);
    assert!(!model.commands.get("setupframed").unwrap().is_system);
    assert_eq!(model.report.clobbers(), 1);
    assert!(model.report.diagnostics.contains(&Diagnostic::AllowedDuplicate {
        name: "thinspace".to_string()
    }));

    assert!(model.commands.contains("setuppapersize"));
    assert!(!model.commands.contains("setupbar"));
    assert_eq!(model.variants.len(), 1);
    assert_eq!(model.variants[0].name, "setupbar");
}

#[test]
fn test_report_counts() {
    let model = fixture_model();

    assert_eq!(model.report.stanzas, 12);
    assert_eq!(model.report.commands, model.commands.len());
    assert_eq!(model.report.classes, 1);
    assert_eq!(model.report.environments, 1);
    assert_eq!(model.report.variants, 1);
    assert_eq!(model.report.donors, 3);
    assert!(
        model
            .report
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::UnnamedStanza { position: 11, .. }))
    );
}

#[test]
fn test_relations_keep_declaration_order() {
    let model = fixture_model();
    let stems: Vec<_> = model.relations.iter().map(Relation::stem).collect();
    assert_eq!(stems, vec!["section", "placefloat"]);
}

#[test]
fn test_fixture_model_validates() {
    let model = fixture_model();
    assert!(validate_table(&model.commands).is_empty());
}

#[test]
fn test_variant_bypass_can_be_disabled() {
    let config = BuildConfig {
        variant_bypass: Vec::new(),
        ..BuildConfig::default()
    };
    let root = load_interface(fixture("interface.xml")).expect("fixture should parse");
    let model = build_interface(root, &config);
    assert!(!model.commands.contains("setuppapersize"));
    assert_eq!(model.variants.len(), 2);
}

fn fixture_model() -> InterfaceModel {
    let root = load_interface(fixture("interface.xml")).expect("fixture should parse");
    build_interface(root, &BuildConfig::default())
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}
