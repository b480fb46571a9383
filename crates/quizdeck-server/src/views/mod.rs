//! Server-rendered HTML.
//!
//! Pages are built with a plain string builder, all CSS inlined; no
//! templating engine. Question content is inserted unescaped on purpose
//! where the source markup must survive (stems, choices, feedback); user
//! identifiers and file names are always escaped.

mod history;
mod login;
mod menu;
mod quiz;
mod users;

pub use history::{history_page, recent_page};
pub use login::login_page;
pub use menu::menu_page;
pub use quiz::{all_questions_page, debug_page, quiz_page};
pub use users::{profile_page, user_edit_page, users_page};

use quizdeck_store::sessions::Session;

/// Escape a string for safe HTML insertion.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Wrap page content in the shared chrome.
pub fn layout(title: &str, body: &str) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{} — quizdeck</title>\n", html_escape(title)));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n<div class=\"container\">\n");
    html.push_str(body);
    html.push_str("</div>\n</body>\n</html>\n");
    html
}

/// The signed-in header bar shown on every authenticated page.
pub fn user_bar(session: &Session) -> String {
    let mut html = String::new();
    html.push_str("<div class=\"user-bar\">\n");
    html.push_str(&format!(
        "<span class=\"user-info\">Logged in as <strong>{}</strong></span>\n",
        html_escape(&session.user_name)
    ));
    html.push_str("<nav>\n<a href=\"/menu\">Menu</a>\n<a href=\"/history\">History</a>\n<a href=\"/recent\">Recent</a>\n");
    if session.role.is_admin() {
        html.push_str("<a href=\"/users\">Users</a>\n");
    }
    html.push_str("<a href=\"/profile\">Profile</a>\n<a href=\"/logout\">Logout</a>\n</nav>\n</div>\n");
    html
}

/// 403 page for non-admin access to admin surfaces.
pub fn forbidden_page(session: &Session) -> String {
    let mut body = String::new();
    body.push_str(&user_bar(session));
    body.push_str("<div class=\"card\">\n<h1>Access denied</h1>\n");
    body.push_str("<p>This page requires an administrator account.</p>\n");
    body.push_str("<p><a href=\"/menu\" class=\"btn\">Back to menu</a></p>\n</div>\n");
    layout("Access denied", &body)
}

pub const CSS: &str = r#"
:root{--bg:#0f1419;--card:#1a202c;--border:#2d3748;--muted:#94a3b8;--accent:#a78bfa;--accent-dark:#8b5cf6;--success:#34d399;--danger:#f87171;--warning:#fbbf24;--text:#f1f5f9}
body{margin:0;font-family:'Segoe UI',Arial,Helvetica,sans-serif;background:var(--bg);color:var(--text)}
.container{max-width:1100px;margin:24px auto;padding:0 16px}
a{color:var(--accent);text-decoration:none}
a:hover{text-decoration:underline}
h1{font-size:26px;margin:0 0 12px}
h2{font-size:19px;margin:18px 0 8px}
.card{background:var(--card);border:1px solid var(--border);border-radius:10px;padding:18px;margin-bottom:14px}
.user-bar{display:flex;justify-content:space-between;align-items:center;margin-bottom:18px;padding:10px 14px;background:var(--card);border:1px solid var(--border);border-radius:10px}
.user-bar nav a{margin-left:14px}
.user-info{color:var(--muted);font-size:14px}
.btn{display:inline-block;padding:8px 16px;border-radius:8px;border:1px solid var(--border);background:var(--accent-dark);color:#fff;font-size:14px;cursor:pointer}
.btn:hover{background:var(--accent);text-decoration:none}
.btn-secondary{background:transparent;color:var(--muted)}
.btn-danger{background:var(--danger);color:#1a202c}
table{width:100%;border-collapse:collapse;font-size:14px}
th,td{padding:8px 10px;text-align:left;border-bottom:1px solid var(--border)}
th{color:var(--muted);font-weight:600}
input,select{background:var(--bg);color:var(--text);border:1px solid var(--border);border-radius:8px;padding:8px 10px;font-size:14px}
label{display:block;margin:10px 0 4px;color:var(--muted);font-size:13px}
.error{color:var(--danger);margin:10px 0}
.muted{color:var(--muted);font-size:13px}
.badge{display:inline-block;padding:2px 8px;border-radius:12px;font-size:12px;border:1px solid var(--border);color:var(--muted)}
.badge-mock{color:var(--warning);border-color:var(--warning)}
.badge-admin{color:var(--accent);border-color:var(--accent)}
.badge-current{color:var(--success);border-color:var(--success)}
.choice{display:block;padding:10px 12px;margin:6px 0;border:1px solid var(--border);border-radius:8px;cursor:pointer}
.choice:hover{border-color:var(--accent)}
.choice.selected{border-color:var(--accent);background:rgba(167,139,250,.08)}
.choice.correct{border-color:var(--success)}
.choice.incorrect{border-color:var(--danger)}
.feedback{margin:10px 0;padding:10px 12px;border-left:3px solid var(--accent);background:rgba(167,139,250,.06);font-size:14px}
.stem table,.choice table{border:1px solid var(--border)}
pre{background:#0b0f14;border:1px solid var(--border);border-radius:8px;padding:12px;overflow:auto;font-size:13px}
.warn{color:var(--warning)}
"#;
