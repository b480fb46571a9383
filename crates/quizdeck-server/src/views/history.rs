use quizdeck_store::history::{QuizAttempt, RecentItem};
use quizdeck_store::sessions::Session;

use super::{html_escape, layout, user_bar};

/// Quiz attempts, newest first.
pub fn history_page(session: &Session, attempts: &[QuizAttempt]) -> String {
    let mut body = String::new();
    body.push_str(&user_bar(session));
    body.push_str(&format!(
        "<h1>Quiz history <span class=\"muted\">({})</span></h1>\n",
        attempts.len()
    ));

    if attempts.is_empty() {
        body.push_str("<div class=\"card\"><p class=\"muted\">No quizzes taken yet. <a href=\"/menu\">Pick one from the menu.</a></p></div>\n");
    } else {
        body.push_str("<div class=\"card\">\n<table>\n");
        body.push_str("<thead><tr><th>Quiz</th><th>When</th><th>Score</th><th>Correct</th><th>Incorrect</th><th>Unanswered</th></tr></thead>\n<tbody>\n");
        for a in attempts {
            body.push_str(&format!(
                "<tr><td><a href=\"/quiz/{name}\">{name}</a></td><td class=\"muted\">{when}</td>\
                 <td>{score}/{max} ({pct:.0}%)</td><td>{correct}</td><td>{incorrect}</td><td>{unanswered}</td></tr>\n",
                name = html_escape(&a.quiz_name),
                when = a.timestamp.format("%Y-%m-%d %H:%M"),
                score = a.score,
                max = a.total_questions * 5,
                pct = a.percentage,
                correct = a.correct,
                incorrect = a.incorrect,
                unanswered = a.unanswered,
            ));
        }
        body.push_str("</tbody>\n</table>\n</div>\n");
    }

    layout("History", &body)
}

/// Recently-viewed quiz files.
pub fn recent_page(session: &Session, items: &[RecentItem]) -> String {
    let mut body = String::new();
    body.push_str(&user_bar(session));
    body.push_str(&format!(
        "<h1>Recently viewed <span class=\"muted\">({})</span></h1>\n",
        items.len()
    ));

    if items.is_empty() {
        body.push_str("<div class=\"card\"><p class=\"muted\">Nothing viewed yet.</p></div>\n");
    } else {
        for item in items {
            body.push_str(&format!(
                "<div class=\"card\"><a href=\"/quiz/{name}\">{name}</a>\
                 <p class=\"muted\">{kind} on {when}</p></div>\n",
                name = html_escape(&item.name),
                kind = html_escape(&item.kind),
                when = item.timestamp.format("%Y-%m-%d %H:%M"),
            ));
        }
    }

    layout("Recently viewed", &body)
}
