use std::path::PathBuf;
use std::sync::OnceLock;

use idnakit::{
    ContextualRulesRegistry, DerivedProperty, IdnaConfig, IdnaContext, IdnaError, RuleBinding,
};

fn repo_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..").join(relative)
}

fn sample_config() -> IdnaConfig {
    IdnaConfig::default().with_data_dir(repo_path("data/ucd-sample"))
}

fn context() -> &'static IdnaContext {
    static CONTEXT: OnceLock<IdnaContext> = OnceLock::new();
    CONTEXT.get_or_init(|| IdnaContext::build(&sample_config()).unwrap())
}

fn cps(s: &str) -> Vec<u32> {
    s.chars().map(u32::from).collect()
}

fn violated_rule(result: Result<(), IdnaError>) -> String {
    match result {
        Err(IdnaError::ContextualRuleViolation { rule, .. }) => rule,
        other => panic!("expected a contextual rule violation, got {other:?}"),
    }
}

#[test]
fn test_valid_labels() {
    let ctx = context();
    for label in [
        "abc",
        "a-b",
        "xn",
        "\u{e9}t\u{e9}",
        "l\u{b7}l",
        "\u{3b1}\u{375}\u{3b2}",
        "\u{5d0}\u{5f3}",
        "\u{5d1}\u{5f4}",
        "\u{30a2}\u{30fb}",
        "\u{915}\u{94d}\u{200d}",
        "\u{915}\u{94d}\u{200c}",
        "\u{628}\u{200c}\u{628}",
        "\u{628}\u{64b}\u{200c}\u{627}",
        "\u{628}\u{661}\u{662}",
        "\u{6f1}\u{6f2}",
        "\u{4e2d}\u{ac00}",
    ] {
        ctx.check_label(&cps(label))
            .unwrap_or_else(|e| panic!("{label:?} rejected: {e}"));
    }
}

#[test]
fn test_structural_errors() {
    let ctx = context();
    assert!(matches!(ctx.check_label(&[]), Err(IdnaError::EmptyLabel)));
    assert!(matches!(
        ctx.check_label(&cps("Abc")),
        Err(IdnaError::FilterRejected { code_point: 0x41, .. })
    ));
    assert!(matches!(
        ctx.check_label(&[0x61, 0x0378]),
        Err(IdnaError::FilterRejected { code_point: 0x0378, .. })
    ));
    assert!(matches!(
        ctx.check_label(&[0x61, 0x110000]),
        Err(IdnaError::InvalidCodePoint(0x110000))
    ));
    for label in ["-ab", "ab-", "ab--c", "xn--abc"] {
        assert!(
            matches!(ctx.check_label(&cps(label)), Err(IdnaError::HyphenRestriction)),
            "{label:?}"
        );
    }
    assert!(matches!(
        ctx.check_label(&cps("\u{301}a")),
        Err(IdnaError::LeadingCombiningMark { code_point: 0x301 })
    ));
}

#[test]
fn test_contextual_violations() {
    let ctx = context();
    let cases = [
        ("a\u{b7}b", "MIDDLE_DOT"),
        ("\u{b7}l", "MIDDLE_DOT"),
        ("\u{3b1}\u{375}a", "GREEK_LOWER_NUMERAL_SIGN"),
        ("a\u{5f3}", "HEBREW_PUNCTUATION_GERESH"),
        ("a\u{5f4}", "HEBREW_PUNCTUATION_GERSHAYIM"),
        ("a\u{30fb}", "KATAKANA_MIDDLE_DOT"),
        ("a\u{200d}", "ZERO_WIDTH_JOINER"),
        ("a\u{200c}b", "ZERO_WIDTH_NON_JOINER"),
        ("\u{627}\u{200c}\u{628}", "ZERO_WIDTH_NON_JOINER"),
        ("\u{661}\u{6f1}", "ARABIC_INDIC_DIGITS"),
        ("\u{6f1}\u{661}", "EXT_ARABIC_INDIC_DIGITS"),
    ];
    for (label, rule) in cases {
        assert_eq!(violated_rule(ctx.check_label(&cps(label))), rule, "{label:?}");
    }
}

fn violated_bidi_rule(result: Result<(), IdnaError>) -> (u8, u32) {
    match result {
        Err(IdnaError::BidiRuleViolation { rule, code_point }) => (rule, code_point),
        other => panic!("expected a Bidi rule violation, got {other:?}"),
    }
}

#[test]
fn test_bidi_rule() {
    let ctx = context();
    assert!(ctx.is_rtl_label(&cps("a\u{661}")));
    assert!(!ctx.is_rtl_label(&cps("\u{6f1}\u{6f2}")));
    for label in ["\u{5d0}1", "\u{5d0}-\u{5d1}", "\u{628}\u{64b}"] {
        ctx.check_label(&cps(label))
            .unwrap_or_else(|e| panic!("{label:?} rejected: {e}"));
    }

    let cases = [
        ("1\u{5d0}", (1, 0x31)),
        ("\u{661}\u{628}", (1, 0x661)),
        ("\u{5d0}a", (2, 0x61)),
        ("\u{628}\u{661}1", (4, 0x31)),
        ("a\u{5d0}", (5, 0x5d0)),
    ];
    for (label, expected) in cases {
        assert_eq!(violated_bidi_rule(ctx.check_label(&cps(label))), expected, "{label:?}");
    }
}

#[test]
fn test_bidi_domain() {
    let ctx = context();
    ctx.check_domain(&[cps("abc"), cps("\u{5d0}\u{5d1}")]).unwrap();
    ctx.check_domain(&[cps("1a"), cps("xyz")]).unwrap();

    // fine alone, but a right-to-left sibling makes the domain a Bidi domain
    ctx.check_label(&cps("1a")).unwrap();
    assert_eq!(
        violated_bidi_rule(ctx.check_domain(&[cps("1a"), cps("\u{5d0}")])),
        (1, 0x31)
    );
    assert!(matches!(
        ctx.check_domain(&[cps("\u{5d0}"), cps("ab-")]),
        Err(IdnaError::HyphenRestriction)
    ));
}

#[test]
fn test_run_contextual_rules() {
    let ctx = context();
    let ran = ctx.run_contextual_rules(&cps("l\u{b7}l")).unwrap();
    assert_eq!(ran.into_iter().collect::<Vec<_>>(), ["MIDDLE_DOT"]);

    let ran = ctx
        .run_contextual_rules(&cps("\u{30a2}\u{30fb}\u{30fb}\u{661}\u{662}"))
        .unwrap();
    assert_eq!(
        ran.into_iter().collect::<Vec<_>>(),
        ["KATAKANA_MIDDLE_DOT", "ARABIC_INDIC_DIGITS"]
    );

    assert!(matches!(
        ctx.run_contextual_rules(&cps("abc")),
        Err(IdnaError::NoContextualRuleExecuted)
    ));
}

#[test]
fn test_missing_rule_for_contextual_point() {
    let only_middle_dot =
        ContextualRulesRegistry::from_bindings(&[RuleBinding::new("MIDDLE_DOT", "MiddleDot")])
            .unwrap();
    let ctx = context().with_rules(only_middle_dot);
    ctx.check_label(&cps("l\u{b7}l")).unwrap();
    assert!(matches!(
        ctx.check_label(&cps("\u{3b1}\u{375}\u{3b2}")),
        Err(IdnaError::NoContextualRuleExecuted)
    ));
}

#[test]
fn test_forwarded_queries() {
    let ctx = context();
    assert_eq!(ctx.get_code_point_derived_property(0x61), DerivedProperty::Pvalid);
    assert_eq!(ctx.get_code_point_derived_property(0x200C), DerivedProperty::ContextJ);
    assert!(ctx.is_disallowed_or_unassigned(0x41));
    assert!(ctx.has_contextual_code_points(&[0x61, 0xB7]));
    assert_eq!(ctx.get_script(0x30A2), "Katakana");
    assert_eq!(ctx.get_canonical_class(0x94D), 9);
    assert_eq!(ctx.rules().len(), 9);
    ctx.assert_no_disallowed_or_unassigned(&cps("abc")).unwrap();
}

#[test]
fn test_build_errors_are_initialization_errors() {
    let missing = IdnaConfig::default().with_data_dir(repo_path("data/no-such-dir"));
    match IdnaContext::build(&missing) {
        Err(IdnaError::Initialization(cause)) => {
            assert!(matches!(*cause, IdnaError::Io { .. }))
        }
        other => panic!("unexpected {other:?}"),
    }

    let bad_rule = sample_config()
        .with_rule_properties("FOO = NoSuchRule\n")
        .unwrap();
    match IdnaContext::build(&bad_rule) {
        Err(IdnaError::Initialization(cause)) => {
            assert!(matches!(*cause, IdnaError::UnknownRuleVariant { .. }))
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_shipped_rule_properties() {
    let text = std::fs::read_to_string(repo_path("data/idna/contextual-rules.properties")).unwrap();
    let config = IdnaConfig::default().with_rule_properties(&text).unwrap();
    assert_eq!(config.contextual_rules, IdnaConfig::default().contextual_rules);

    let config = sample_config().with_rule_file(repo_path("data/idna/contextual-rules.properties"));
    assert_eq!(IdnaContext::build(&config).unwrap().rules().len(), 9);
}

#[test]
fn test_malformed_rule_file_fails_build() {
    let path = std::env::temp_dir().join(format!("idnakit-rules-{}.properties", std::process::id()));
    std::fs::write(&path, "# rules\nMIDDLE_DOT=MiddleDot\nKATAKANA_MIDDLE_DOT KatakanaMiddleDot\n").unwrap();
    let result = IdnaContext::build(&sample_config().with_rule_file(&path));
    std::fs::remove_file(&path).unwrap();

    match result {
        Err(IdnaError::Initialization(cause)) => match *cause {
            IdnaError::InvalidFileFormat { line_number, line, .. } => {
                assert_eq!(line_number, 3);
                assert_eq!(line, "KATAKANA_MIDDLE_DOT KatakanaMiddleDot");
            }
            other => panic!("unexpected cause {other:?}"),
        },
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_load_json_config() {
    let path = std::env::temp_dir().join(format!("idnakit-config-{}.json", std::process::id()));
    let json = serde_json::json!({
        "data_dir": repo_path("data/ucd-sample"),
        "contextual_rules": [{ "name": "MIDDLE_DOT", "variant": "MiddleDot" }],
        "filter_range_threshold": 12,
    });
    std::fs::write(&path, json.to_string()).unwrap();
    let config = IdnaConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.data_dir, repo_path("data/ucd-sample"));
    assert_eq!(config.contextual_rules, vec![RuleBinding::new("MIDDLE_DOT", "MiddleDot")]);
    assert_eq!(config.filter_range_threshold, 12);
}
