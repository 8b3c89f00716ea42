use maud::{DOCTYPE, Markup, PreEscaped, html};

use super::{
    scroll::{BACK_TO_TOP_THRESHOLD_PX, ScrollCommand},
    tracking::PageViewTracker,
};

/// Path prefix of the back office. Pages under it render without site chrome.
pub const ADMIN_PREFIX: &str = "/admin";

/// True for `/admin` and anything below it, but not for `/administrator`.
pub fn is_admin_path(path: &str) -> bool {
    match path.strip_prefix(ADMIN_PREFIX) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Chrome
///
/// Which global layout parts surround a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chrome {
    pub header: bool,
    pub footer: bool,
}

impl Chrome {
    pub fn for_path(path: &str) -> Self {
        let public = !is_admin_path(path);
        Self {
            header: public,
            footer: public,
        }
    }
}

/// What a page contributes to the shell. `body` is trusted markup and is not escaped.
#[derive(Debug, Clone, Copy)]
pub struct ShellContent<'a> {
    pub site_name: &'a str,
    pub title: &'a str,
    pub body: &'a str,
}

/// render_shell
///
/// Wraps page markup in the global layout for `path`: header and footer unless the
/// path is in the back office, the back-to-top control and the scroll reset. Only
/// shells given a `tracker` carry the page-view report, and only until it has fired.
pub fn render_shell(
    path: &str,
    content: &ShellContent<'_>,
    tracker: Option<&PageViewTracker>,
) -> Markup {
    let chrome = Chrome::for_path(path);

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (content.title) " | " (content.site_name) }
            }
            body {
                @if chrome.header {
                    header.site-header { a href="/" { (content.site_name) } }
                }
                main { (PreEscaped(content.body)) }
                @if chrome.footer {
                    footer.site-footer { p { (content.site_name) } }
                }
                button #back-to-top type="button" aria-label="Back to top" hidden { "↑" }
                script { (PreEscaped(shell_script(tracker))) }
            }
        }
    }
}

fn shell_script(tracker: Option<&PageViewTracker>) -> String {
    let to_top = scroll_to_js(ScrollCommand::to_top());
    let page_view = match tracker.and_then(PageViewTracker::on_mount) {
        Some(view) => format!(
            "window.dataLayer = window.dataLayer || []; \
             window.dataLayer.push({{ event: 'page_view', page_path: {} }});",
            js_string(view.path)
        ),
        None => String::new(),
    };

    format!(
        r#"
(function () {{
  var button = document.getElementById('back-to-top');
  var update = function () {{ button.hidden = !(window.scrollY > {threshold}); }};
  window.addEventListener('scroll', update, {{ passive: true }});
  button.addEventListener('click', function () {{ window.scrollTo({to_top}); }});
  update();
  window.scrollTo({to_top});
  {page_view}
}})();
"#,
        threshold = BACK_TO_TOP_THRESHOLD_PX,
    )
}

fn scroll_to_js(command: ScrollCommand) -> String {
    format!(
        "{{ top: {}, behavior: '{}' }}",
        command.top,
        command.behavior.as_str()
    )
}

/// JSON string literal that cannot close the surrounding script element.
pub fn js_string(raw: &str) -> String {
    serde_json::Value::from(raw).to_string().replace("</", "<\\/")
}
