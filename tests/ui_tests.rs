use realty_portal::ui::{
    BACK_TO_TOP_THRESHOLD_PX, BackToTop, Chrome, PageViewTracker, ScrollBehavior, ScrollCommand,
    ScrollReset, ShellContent, TRACKED_PATH, is_admin_path, js_string, render_shell,
};

const CONTENT: ShellContent<'static> = ShellContent {
    site_name: "Harbor Homes",
    title: "Find your next home",
    body: "<p>listings</p>",
};

// --- Back to top ---

#[test]
fn test_back_to_top_visible_only_past_threshold() {
    let mut button = BackToTop::default();
    assert!(!button.is_visible());

    assert!(!button.on_scroll(BACK_TO_TOP_THRESHOLD_PX));
    assert!(button.on_scroll(301.0));
    assert!(button.is_visible());
    assert!(!button.on_scroll(120.0));
    assert!(!button.is_visible());
}

#[test]
fn test_back_to_top_click_scrolls_smoothly_to_top() {
    let button = BackToTop::default();
    assert_eq!(
        button.click(),
        ScrollCommand {
            top: 0.0,
            behavior: ScrollBehavior::Smooth
        }
    );
}

// --- Scroll reset ---

#[test]
fn test_scroll_reset_on_first_render_and_path_change() {
    let mut reset = ScrollReset::default();

    assert_eq!(reset.on_navigate("/"), Some(ScrollCommand::to_top()));
    assert_eq!(reset.on_navigate("/"), None);
    assert_eq!(reset.on_navigate("/listings"), Some(ScrollCommand::to_top()));
    assert_eq!(reset.on_navigate("/"), Some(ScrollCommand::to_top()));
}

// --- Chrome ---

#[test]
fn test_admin_paths_hide_chrome() {
    for path in ["/admin", "/admin/", "/admin/inquiries", "/admin/settings/smtp"] {
        assert!(is_admin_path(path), "{path}");
        assert_eq!(
            Chrome::for_path(path),
            Chrome {
                header: false,
                footer: false
            }
        );
    }
}

#[test]
fn test_public_paths_keep_chrome() {
    for path in ["/", "/listings", "/administrator", "/about/admin"] {
        assert!(!is_admin_path(path), "{path}");
        assert_eq!(
            Chrome::for_path(path),
            Chrome {
                header: true,
                footer: true
            }
        );
    }
}

// --- Page view tracking ---

#[test]
fn test_tracker_reports_root_once() {
    let tracker = PageViewTracker::new();

    let first = tracker.on_mount().expect("first mount reports");
    assert_eq!(first.path, TRACKED_PATH);
    assert!(tracker.on_mount().is_none());
    assert!(tracker.on_mount().is_none());
}

// --- Shell ---

#[test]
fn test_public_shell_has_chrome_and_reports_view() {
    let tracker = PageViewTracker::new();
    let html = render_shell("/", &CONTENT, Some(&tracker)).into_string();

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(r#"<header class="site-header">"#));
    assert!(html.contains(r#"<footer class="site-footer">"#));
    assert!(html.contains("<main><p>listings</p></main>"));
    assert!(html.contains(r#"id="back-to-top""#));
    assert!(html.contains("window.scrollY > 300"));
    assert!(html.contains("behavior: 'smooth'"));
    assert!(html.contains(r#"event: 'page_view', page_path: "/""#));

    // The same layout instance never reports twice.
    let again = render_shell("/", &CONTENT, Some(&tracker)).into_string();
    assert!(!again.contains("page_view"));
}

#[test]
fn test_admin_shell_has_no_chrome() {
    let html = render_shell("/admin/inquiries", &CONTENT, None).into_string();

    assert!(!html.contains("<header"));
    assert!(!html.contains("<footer"));
    assert!(html.contains(r#"id="back-to-top""#));
}

#[test]
fn test_shell_without_tracker_never_reports() {
    let html = render_shell("/admin", &CONTENT, None).into_string();

    assert!(!html.contains("page_view"));
    assert!(!html.contains("dataLayer"));
}

#[test]
fn test_shell_escapes_site_name_and_title() {
    let content = ShellContent {
        site_name: "Tom & Jerry <Homes>",
        title: "<Best>",
        body: "<em>trusted</em>",
    };
    let html = render_shell("/", &content, None).into_string();

    assert!(html.contains("Tom &amp; Jerry &lt;Homes&gt;"));
    assert!(html.contains("<title>&lt;Best&gt; | Tom &amp; Jerry &lt;Homes&gt;</title>"));
    assert!(!html.contains("<Homes>"));
    assert!(html.contains("<main><em>trusted</em></main>"));
}

#[test]
fn test_script_strings_are_quoted_and_cannot_close_script() {
    assert_eq!(js_string("/"), r#""/""#);
    assert_eq!(js_string("/it's"), r#""/it's""#);
    assert_eq!(js_string(r#"/a"b\c"#), r#""/a\"b\\c""#);

    let hostile = js_string("/x</script><script>alert(1)</script>");
    assert!(!hostile.contains("</script>"));
    assert!(hostile.starts_with('"') && hostile.ends_with('"'));
}
