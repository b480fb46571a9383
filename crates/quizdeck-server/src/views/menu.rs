use quizdeck_core::catalog::{QuizFile, SortOrder};
use quizdeck_store::history::RecentItem;
use quizdeck_store::sessions::Session;

use super::{html_escape, layout, user_bar};

/// The quiz menu: catalog listing with sort controls, recently-viewed
/// strip, and the admin upload form.
pub fn menu_page(
    session: &Session,
    files: &[QuizFile],
    recent: &[RecentItem],
    sort: SortOrder,
) -> String {
    let mocks = files.iter().filter(|f| f.is_mock).count();
    let modules = files.iter().filter(|f| f.is_module).count();

    let mut body = String::new();
    body.push_str(&user_bar(session));
    body.push_str("<h1>Quiz Menu</h1>\n");
    body.push_str(&format!(
        "<p class=\"muted\">{} files, {mocks} mock exams, {modules} modules</p>\n",
        files.len()
    ));

    if !recent.is_empty() {
        body.push_str("<div class=\"card\">\n<h2>Recently viewed</h2>\n<p>\n");
        for item in recent {
            body.push_str(&format!(
                "<a class=\"badge\" href=\"/quiz/{name}\">{name}</a>\n",
                name = html_escape(&item.name)
            ));
        }
        body.push_str("</p>\n</div>\n");
    }

    body.push_str("<div class=\"card\">\n");
    body.push_str("<form method=\"get\" action=\"/menu\" style=\"margin-bottom:12px\">\n");
    body.push_str("<label for=\"sort\">Sort modules by</label>\n<select id=\"sort\" name=\"sort\" onchange=\"this.form.submit()\">\n");
    for (value, label) in [
        (SortOrder::Id, "Module number"),
        (SortOrder::Alphabetical, "Name (A-Z)"),
        (SortOrder::ReverseAlphabetical, "Name (Z-A)"),
        (SortOrder::Category, "Topic area"),
    ] {
        let selected = if value == sort { " selected" } else { "" };
        body.push_str(&format!(
            "<option value=\"{}\"{selected}>{label}</option>\n",
            value.as_str()
        ));
    }
    body.push_str("</select>\n</form>\n");

    body.push_str("<table>\n<thead><tr><th>Quiz</th><th>Questions</th><th>Size</th><th>Topic area</th><th></th></tr></thead>\n<tbody>\n");
    for file in files {
        let name = html_escape(&file.name);
        let badge = if file.is_mock {
            " <span class=\"badge badge-mock\">MOCK</span>"
        } else {
            ""
        };
        let category = file.category().unwrap_or("");
        body.push_str(&format!(
            "<tr><td><a href=\"/quiz/{name}\">{display}</a>{badge}</td><td>{questions}</td><td>{size}</td><td class=\"muted\">{category}</td>\
             <td><a href=\"/all-questions/{name}\">answers</a> <a href=\"/debug/{name}\" class=\"muted\">debug</a></td></tr>\n",
            display = html_escape(&file.display_name),
            questions = file.questions,
            size = file.size_display(),
        ));
    }
    body.push_str("</tbody>\n</table>\n</div>\n");

    if session.role.is_admin() {
        body.push_str("<div class=\"card\">\n<h2>Upload quiz file</h2>\n");
        body.push_str(
            "<form method=\"post\" action=\"/upload\" enctype=\"multipart/form-data\">\n\
             <input type=\"file\" name=\"file\" accept=\".json\" required>\n\
             <button class=\"btn\" type=\"submit\">Upload</button>\n</form>\n</div>\n",
        );
    }

    layout("Quiz Menu", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use quizdeck_store::users::Role;

    fn session(role: Role) -> Session {
        Session {
            user_id: "alice".into(),
            user_name: "Alice".into(),
            role,
            created_at: Utc::now(),
        }
    }

    fn file(name: &str) -> QuizFile {
        QuizFile {
            name: name.to_string(),
            display_name: name.trim_end_matches(".json").to_string(),
            size_bytes: 2048,
            questions: 3,
            is_mock: name.contains("Mock"),
            is_module: name.starts_with("Module"),
        }
    }

    #[test]
    fn lists_files_with_links_and_counts() {
        let files = [file("Module 1 Rates.json"), file("Mock Exam A.json")];
        let page = menu_page(&session(Role::User), &files, &[], SortOrder::Id);
        assert!(page.contains("/quiz/Module 1 Rates.json"));
        assert!(page.contains("MOCK"));
        assert!(page.contains("2 files, 1 mock exams, 1 modules"));
        // Non-admins get no upload form.
        assert!(!page.contains("/upload"));
    }

    #[test]
    fn admins_see_the_upload_form() {
        let page = menu_page(&session(Role::Admin), &[], &[], SortOrder::Id);
        assert!(page.contains("action=\"/upload\""));
    }

    #[test]
    fn recently_viewed_items_are_linked() {
        let recent = [RecentItem {
            name: "Module 2 FX.json".into(),
            kind: "quiz".into(),
            timestamp: Utc::now(),
        }];
        let page = menu_page(&session(Role::User), &[], &recent, SortOrder::Id);
        assert!(page.contains("Recently viewed"));
        assert!(page.contains("/quiz/Module 2 FX.json"));
    }
}
