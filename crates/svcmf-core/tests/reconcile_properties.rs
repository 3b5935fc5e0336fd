use svcmf_core::discover::DiscoveredFile;
use svcmf_core::header::tokenize_header;
use svcmf_core::reconcile::reconcile;
use svcmf_core::{CheckConfig, Finding, FindingKind};

const HEADER_LINE: u32 = 11;

fn files(names: &[&str]) -> Vec<DiscoveredFile> {
    names
        .iter()
        .map(|n| DiscoveredFile {
            name: n.rsplit('/').next().unwrap_or(n).to_string(),
            relative_path: n.to_string(),
            excluded: false,
        })
        .collect()
}

fn run(header: Option<&str>, discovered: &[DiscoveredFile]) -> Vec<Finding> {
    let cfg = CheckConfig::default();
    let decls = tokenize_header(header, &cfg);
    let line = header.map(|_| HEADER_LINE);
    reconcile(&decls, discovered, line, &cfg)
}

fn kinds(findings: &[Finding]) -> Vec<FindingKind> {
    findings.iter().map(|f| f.kind).collect()
}

fn at(line: u32, kind: FindingKind, param: &str) -> Finding {
    Finding::with_param(line, kind, param)
}

#[test]
fn no_header_reports_every_file_at_line_zero() {
    let got = run(None, &files(&["a.xml", "b.xml", "sub/c.xml"]));
    assert_eq!(
        got,
        vec![
            at(0, FindingKind::NotIncludedService, "a.xml"),
            at(0, FindingKind::NotIncludedService, "b.xml"),
            at(0, FindingKind::NotIncludedService, "c.xml"),
        ]
    );
}

#[test]
fn no_header_and_no_files_is_clean() {
    assert!(run(None, &[]).is_empty());
}

#[test]
fn global_wildcard_alone_covers_everything() {
    let got = run(Some("OSGI-INF/*.xml"), &files(&["a.xml", "b.xml"]));
    assert!(got.is_empty(), "{got:?}");
}

#[test]
fn global_wildcard_with_other_tokens_reports_repeated_once() {
    let got = run(
        Some("OSGI-INF/*.xml,OSGI-INF/a.xml,OSGI-INF/missing.xml"),
        &files(&["a.xml", "b.xml", "c.xml"]),
    );
    assert_eq!(got, vec![Finding::new(HEADER_LINE, FindingKind::RepeatedService)]);
}

#[test]
fn explicit_before_global_wildcard_keeps_advice() {
    let got = run(
        Some("OSGI-INF/a.xml,OSGI-INF/*.xml"),
        &files(&["a.xml", "extra.xml"]),
    );
    assert_eq!(
        kinds(&got),
        vec![FindingKind::BestApproach, FindingKind::RepeatedService]
    );
}

#[test]
fn explicit_declaration_matching_file_only_advises() {
    let got = run(Some("OSGI-INF/a.xml"), &files(&["a.xml"]));
    assert_eq!(got, vec![Finding::new(HEADER_LINE, FindingKind::BestApproach)]);
}

#[test]
fn explicit_declaration_without_file_is_missing() {
    let got = run(Some("OSGI-INF/a.xml"), &[]);
    assert_eq!(
        got,
        vec![
            Finding::new(HEADER_LINE, FindingKind::BestApproach),
            at(HEADER_LINE, FindingKind::NotExistingService, "a.xml"),
        ]
    );
}

#[test]
fn wrong_directory_does_not_suppress_reconciliation() {
    let got = run(Some("wrong/a.xml"), &[]);
    assert_eq!(
        got,
        vec![
            at(HEADER_LINE, FindingKind::WrongDirectory, "wrong"),
            Finding::new(HEADER_LINE, FindingKind::BestApproach),
            at(HEADER_LINE, FindingKind::NotExistingService, "a.xml"),
        ]
    );

    let got = run(Some("OSGI-INF/services/a.xml"), &files(&["services/a.xml"]));
    assert_eq!(
        got,
        vec![
            at(HEADER_LINE, FindingKind::WrongDirectory, "services"),
            Finding::new(HEADER_LINE, FindingKind::BestApproach),
        ]
    );
}

#[test]
fn wrong_extension_drops_the_declaration() {
    let got = run(Some("OSGI-INF/a.txt"), &files(&["a.xml"]));
    assert_eq!(
        got,
        vec![
            at(HEADER_LINE, FindingKind::WrongExtension, "a.txt"),
            at(HEADER_LINE, FindingKind::NotIncludedService, "a.xml"),
        ]
    );
}

#[test]
fn partial_wildcard_consumes_matches() {
    let got = run(
        Some("OSGI-INF/service*.xml"),
        &files(&["other.xml", "serviceOne.xml"]),
    );
    assert_eq!(
        got,
        vec![
            Finding::new(HEADER_LINE, FindingKind::BestApproach),
            at(HEADER_LINE, FindingKind::NotIncludedService, "other.xml"),
        ]
    );
}

#[test]
fn partial_wildcard_without_match_is_reported_by_raw_token() {
    let got = run(Some(" OSGI-INF/nothing*.xml "), &files(&["a.xml"]));
    assert_eq!(
        got,
        vec![
            at(HEADER_LINE, FindingKind::NotMatchingRegex, "OSGI-INF/nothing*.xml"),
            at(HEADER_LINE, FindingKind::NotIncludedService, "a.xml"),
        ]
    );
}

#[test]
fn best_approach_is_emitted_at_most_once() {
    let got = run(
        Some("OSGI-INF/a.xml,OSGI-INF/b*.xml,OSGI-INF/c.xml"),
        &files(&["a.xml", "b1.xml", "c.xml"]),
    );
    assert_eq!(got, vec![Finding::new(HEADER_LINE, FindingKind::BestApproach)]);
}

#[test]
fn file_is_never_attributed_twice() {
    let got = run(
        Some("OSGI-INF/ab*.xml,OSGI-INF/abc.xml"),
        &files(&["abc.xml"]),
    );
    assert_eq!(got, vec![Finding::new(HEADER_LINE, FindingKind::BestApproach)]);
}

#[test]
fn missing_follow_declaration_order_and_undeclared_follow_discovery_order() {
    let got = run(
        Some("OSGI-INF/z.xml,OSGI-INF/y.xml,OSGI-INF/present.xml"),
        &files(&["b.xml", "present.xml", "sub/a.xml"]),
    );
    assert_eq!(
        got,
        vec![
            Finding::new(HEADER_LINE, FindingKind::BestApproach),
            at(HEADER_LINE, FindingKind::NotExistingService, "z.xml"),
            at(HEADER_LINE, FindingKind::NotExistingService, "y.xml"),
            at(HEADER_LINE, FindingKind::NotIncludedService, "b.xml"),
            at(HEADER_LINE, FindingKind::NotIncludedService, "a.xml"),
        ]
    );
}

#[test]
fn excluded_files_never_participate() {
    let mut discovered = files(&["a.xml"]);
    discovered.push(DiscoveredFile {
        name: "bp.xml".to_string(),
        relative_path: "blueprint/bp.xml".to_string(),
        excluded: true,
    });
    let got = run(None, &discovered);
    assert_eq!(got, vec![at(0, FindingKind::NotIncludedService, "a.xml")]);

    let got = run(Some("OSGI-INF/bp.xml"), &discovered);
    assert!(got.contains(&at(HEADER_LINE, FindingKind::NotExistingService, "bp.xml")));
    assert!(!got
        .iter()
        .any(|f| f.kind == FindingKind::NotIncludedService && f.params == ["bp.xml"]));
}

#[test]
fn empty_header_value_reports_undeclared_at_header_line() {
    let got = run(Some("  "), &files(&["a.xml"]));
    assert_eq!(
        got,
        vec![at(HEADER_LINE, FindingKind::NotIncludedService, "a.xml")]
    );
}

#[test]
fn reconciliation_is_deterministic() {
    let discovered = files(&["a.xml", "b.xml", "serviceOne.xml", "sub/x.xml"]);
    let header = Some("wrong/a.xml,OSGI-INF/service*.xml,OSGI-INF/none*.xml,OSGI-INF/q.txt");
    let first = run(header, &discovered);
    let second = run(header, &discovered);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn partial_wildcard_never_matches_the_extension() {
    let discovered = files(&["manager.xml", "other.xml", "zeta.xml"]);
    assert_eq!(
        run(Some("OSGI-INF/m*.xml"), &discovered),
        vec![
            Finding::new(HEADER_LINE, FindingKind::BestApproach),
            at(HEADER_LINE, FindingKind::NotIncludedService, "other.xml"),
            at(HEADER_LINE, FindingKind::NotIncludedService, "zeta.xml"),
        ]
    );

    for token in ["OSGI-INF/x*.xml", "OSGI-INF/*l.xml"] {
        assert_eq!(
            run(Some(token), &discovered),
            vec![
                at(HEADER_LINE, FindingKind::NotMatchingRegex, token),
                at(HEADER_LINE, FindingKind::NotIncludedService, "manager.xml"),
                at(HEADER_LINE, FindingKind::NotIncludedService, "other.xml"),
                at(HEADER_LINE, FindingKind::NotIncludedService, "zeta.xml"),
            ],
            "{token}"
        );
    }
}

#[test]
fn same_name_in_two_subfolders_is_reported_per_file() {
    let discovered = files(&["a.xml", "sub/a.xml"]);
    assert_eq!(
        run(None, &discovered),
        vec![
            at(0, FindingKind::NotIncludedService, "a.xml"),
            at(0, FindingKind::NotIncludedService, "a.xml"),
        ]
    );

    // An explicit declaration covers every file with that name.
    assert_eq!(
        run(Some("OSGI-INF/a.xml"), &discovered),
        vec![Finding::new(HEADER_LINE, FindingKind::BestApproach)]
    );

    // A partial wildcard consumes both.
    assert_eq!(
        run(Some("OSGI-INF/a*.xml,OSGI-INF/b.xml"), &files(&["a.xml", "sub/a.xml", "b.xml"])),
        vec![Finding::new(HEADER_LINE, FindingKind::BestApproach)]
    );
}
