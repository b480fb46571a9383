use super::{html_escape, layout};

pub fn login_page(error: Option<&str>) -> String {
    let mut body = String::new();
    body.push_str("<div class=\"card\" style=\"max-width:380px;margin:60px auto\">\n");
    body.push_str("<h1>quizdeck</h1>\n<p class=\"muted\">Sign in to continue</p>\n");
    if let Some(error) = error {
        body.push_str(&format!("<p class=\"error\">{}</p>\n", html_escape(error)));
    }
    body.push_str("<form method=\"post\" action=\"/login\">\n");
    body.push_str("<label for=\"user_id\">User ID</label>\n");
    body.push_str("<input id=\"user_id\" name=\"user_id\" required autofocus style=\"width:100%\">\n");
    body.push_str("<label for=\"password\">Password</label>\n");
    body.push_str(
        "<input id=\"password\" name=\"password\" type=\"password\" required style=\"width:100%\">\n",
    );
    body.push_str("<p><button class=\"btn\" type=\"submit\">Sign in</button></p>\n");
    body.push_str("</form>\n</div>\n");
    layout("Sign in", &body)
}
