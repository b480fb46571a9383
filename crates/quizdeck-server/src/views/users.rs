use quizdeck_store::sessions::Session;
use quizdeck_store::users::{Role, User};

use super::{html_escape, layout, user_bar};

/// Admin user listing with the add-user form.
pub fn users_page(session: &Session, users: &[User], error: Option<&str>) -> String {
    let mut body = String::new();
    body.push_str(&user_bar(session));
    body.push_str("<h1>User management</h1>\n");
    if let Some(error) = error {
        body.push_str(&format!("<p class=\"error\">{}</p>\n", html_escape(error)));
    }

    body.push_str("<div class=\"card\">\n");
    body.push_str("<table>\n<thead><tr><th>ID</th><th>Name</th><th>Role</th><th>Expiry</th><th>Status</th><th></th></tr></thead>\n<tbody>\n");
    for user in users {
        let role_badge = if user.role.is_admin() {
            "<span class=\"badge badge-admin\">admin</span>"
        } else {
            "<span class=\"badge\">user</span>"
        };
        let status = if user.is_valid() {
            "<span class=\"badge badge-current\">active</span>"
        } else {
            "<span class=\"badge\">expired</span>"
        };
        body.push_str(&format!(
            "<tr><td>{id}</td><td>{name}</td><td>{role_badge}</td><td class=\"muted\">{expiry}</td><td>{status}</td>\
             <td><a href=\"/users/{id}/edit\">edit</a>\n\
             <form method=\"post\" action=\"/users/remove\" style=\"display:inline\">\
             <input type=\"hidden\" name=\"user_id\" value=\"{id}\">\
             <button class=\"btn btn-danger\" type=\"submit\">remove</button></form></td></tr>\n",
            id = html_escape(&user.id),
            name = html_escape(&user.name),
            expiry = html_escape(user.expiry.as_deref().unwrap_or("never")),
        ));
    }
    body.push_str("</tbody>\n</table>\n</div>\n");

    body.push_str("<div class=\"card\">\n<h2>Add user</h2>\n");
    body.push_str("<form method=\"post\" action=\"/users/add\">\n");
    body.push_str("<label>User ID</label><input name=\"user_id\" required>\n");
    body.push_str("<label>Name</label><input name=\"name\" required>\n");
    body.push_str("<label>Password</label><input name=\"password\" type=\"password\" required>\n");
    body.push_str(&role_select(Role::User));
    body.push_str("<label>Expiry (optional, YYYY-MM-DD)</label><input name=\"expiry\">\n");
    body.push_str("<p><button class=\"btn\" type=\"submit\">Add user</button></p>\n</form>\n</div>\n");

    layout("Users", &body)
}

/// Edit form for one user.
pub fn user_edit_page(session: &Session, user: &User, error: Option<&str>) -> String {
    let mut body = String::new();
    body.push_str(&user_bar(session));
    body.push_str(&format!("<h1>Edit {}</h1>\n", html_escape(&user.id)));
    if let Some(error) = error {
        body.push_str(&format!("<p class=\"error\">{}</p>\n", html_escape(error)));
    }

    body.push_str("<div class=\"card\">\n");
    body.push_str(&format!(
        "<form method=\"post\" action=\"/users/{}/edit\">\n",
        html_escape(&user.id)
    ));
    body.push_str(&format!(
        "<label>Name</label><input name=\"name\" value=\"{}\">\n",
        html_escape(&user.name)
    ));
    body.push_str(&role_select(user.role));
    body.push_str(&format!(
        "<label>Expiry (blank for none)</label><input name=\"expiry\" value=\"{}\">\n",
        html_escape(user.expiry.as_deref().unwrap_or(""))
    ));
    body.push_str("<label>New password (blank to keep)</label><input name=\"password\" type=\"password\">\n");
    body.push_str("<p><button class=\"btn\" type=\"submit\">Save</button> <a class=\"btn btn-secondary\" href=\"/users\">Cancel</a></p>\n");
    body.push_str("</form>\n</div>\n");

    layout("Edit user", &body)
}

/// Self-service profile form for the signed-in user. Name and password
/// only; role and expiry stay admin-controlled.
pub fn profile_page(session: &Session, user: &User, error: Option<&str>, saved: bool) -> String {
    let mut body = String::new();
    body.push_str(&user_bar(session));
    body.push_str("<h1>My profile</h1>\n");
    if let Some(error) = error {
        body.push_str(&format!("<p class=\"error\">{}</p>\n", html_escape(error)));
    }
    if saved {
        body.push_str("<p class=\"muted\">Profile updated.</p>\n");
    }

    body.push_str("<div class=\"card\">\n");
    body.push_str(&format!(
        "<p class=\"muted\">User ID: {} ({})</p>\n",
        html_escape(&user.id),
        user.role
    ));
    body.push_str("<form method=\"post\" action=\"/profile\">\n");
    body.push_str(&format!(
        "<label>Full name</label><input name=\"name\" value=\"{}\" required>\n",
        html_escape(&user.name)
    ));
    body.push_str(
        "<label>New password (blank to keep)</label><input name=\"password\" type=\"password\">\n",
    );
    body.push_str("<p><button class=\"btn\" type=\"submit\">Save</button> <a class=\"btn btn-secondary\" href=\"/menu\">Back</a></p>\n");
    body.push_str("</form>\n</div>\n");

    layout("My profile", &body)
}

fn role_select(current: Role) -> String {
    let mut html = String::from("<label>Role</label><select name=\"role\">\n");
    for role in [Role::User, Role::Admin] {
        let selected = if role == current { " selected" } else { "" };
        html.push_str(&format!("<option value=\"{role}\"{selected}>{role}</option>\n"));
    }
    html.push_str("</select>\n");
    html
}
