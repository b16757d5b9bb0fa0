use release_preflight::boundary::BoundaryWarning;
use release_preflight::domain::Template;

// ============================================================================
// BoundaryWarning Display Tests
// ============================================================================

#[test]
fn test_boundary_warning_nothing_to_commit_display() {
    let warning = BoundaryWarning::NothingToCommit {
        branch: "master".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("No changes to commit"),
        "Message should contain 'No changes to commit', got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("master"),
        "Message should contain branch 'master', got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_no_previous_tag_display() {
    let warning = BoundaryWarning::NoPreviousTag {
        template: "v${version}".to_string(),
    };

    let display_msg = warning.to_string();
    assert_eq!(display_msg, "No existing tag matches 'v${version}'");
}

#[test]
fn test_boundary_warning_unknown_point_display() {
    let warning = BoundaryWarning::UnknownLifecyclePoint {
        point: "after:bump".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("after:bump"),
        "Message should name the point, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("never run"),
        "Message should say the hooks never run, got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_template_without_placeholder_display() {
    let warning = BoundaryWarning::TemplateWithoutPlaceholder {
        key: "tagName".to_string(),
        template: "latest".to_string(),
    };

    assert_eq!(
        warning.to_string(),
        "tagName 'latest' has no ${version} placeholder"
    );
}

#[test]
fn test_boundary_warning_no_upstream_display() {
    let warning = BoundaryWarning::NoUpstream {
        branch: "feature/x".to_string(),
        remote: "origin".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("feature/x"),
        "Message should contain the branch, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("'origin'"),
        "Message should contain the fallback remote, got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_release_not_rolled_back_display() {
    let warning = BoundaryWarning::ReleaseNotRolledBack {
        tag: "v1.2.3".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("v1.2.3"),
        "Message should contain tag 'v1.2.3', got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("not rolled back"),
        "Message should say nothing is undone, got: {}",
        display_msg
    );
}

// ============================================================================
// Tag template matching
// ============================================================================

#[test]
fn test_template_matches_simple_prefix() {
    let template = Template::new("v${version}");
    assert!(template.matches("v1.2.3").unwrap());
    assert!(template.matches("v0.0.1").unwrap());
}

#[test]
fn test_template_rejects_missing_prefix() {
    let template = Template::new("v${version}");
    assert!(!template.matches("1.2.3").unwrap());
    assert!(!template.matches("release-1.2.3").unwrap());
}

#[test]
fn test_template_matches_suffix() {
    let template = Template::new("v${version}-release");
    assert!(template.matches("v1.2.3-release").unwrap());
    assert!(!template.matches("v1.2.3").unwrap());
}

#[test]
fn test_template_regex_characters_are_literal() {
    let template = Template::new("app.v${version}+final");
    assert!(template.matches("app.v1.0.0+final").unwrap());
    assert!(!template.matches("appXv1.0.0+final").unwrap());
}

#[test]
fn test_template_without_placeholder_matches_itself_only() {
    let template = Template::new("stable");
    assert!(template.matches("stable").unwrap());
    assert!(!template.matches("stable-1").unwrap());
}

#[test]
fn test_template_placeholder_needs_text() {
    let template = Template::new("v${version}");
    assert!(!template.matches("v").unwrap());
}
