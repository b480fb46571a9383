use quizdeck_core::model::{Question, NEUTRAL_FEEDBACK_KEY};
use quizdeck_core::validate::ValidationWarning;
use quizdeck_store::sessions::Session;

use super::{html_escape, layout, user_bar};

/// Serialize questions for embedding in a `<script>` block. `</` must not
/// appear verbatim inside inline scripts.
fn questions_json(questions: &[Question]) -> String {
    serde_json::to_string(questions)
        .unwrap_or_else(|_| "[]".to_string())
        .replace("</", "<\\/")
}

/// The interactive player page.
///
/// Questions are embedded as JSON and rendered client-side. Regular
/// quizzes grade each answer immediately; mock exams withhold grading
/// until every question is answered, then submit the result.
pub fn quiz_page(session: &Session, name: &str, questions: &[Question], is_mock: bool) -> String {
    let mut body = String::new();
    body.push_str(&user_bar(session));
    body.push_str(&format!("<h1>{}</h1>\n", html_escape(name)));
    if is_mock {
        body.push_str("<p class=\"muted\">Mock exam: answers are graded after you finish.</p>\n");
    }
    body.push_str("<div id=\"quiz\"></div>\n");
    body.push_str("<div id=\"summary\" class=\"card\" style=\"display:none\"></div>\n");
    body.push_str("<script>\n");
    body.push_str(&format!("const QUIZ_NAME = {};\n", js_string(name)));
    body.push_str(&format!("const IS_MOCK = {is_mock};\n"));
    body.push_str(&format!("const QUESTIONS = {};\n", questions_json(questions)));
    body.push_str(PLAYER_JS);
    body.push_str("</script>\n");
    layout(name, &body)
}

fn js_string(s: &str) -> String {
    serde_json::to_string(s)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace("</", "<\\/")
}

/// Every question as a card with the correct answer and feedback visible.
pub fn all_questions_page(session: &Session, name: &str, questions: &[Question]) -> String {
    let mut body = String::new();
    body.push_str(&user_bar(session));
    body.push_str(&format!(
        "<h1>{} <span class=\"muted\">(all questions)</span></h1>\n",
        html_escape(name)
    ));

    for (idx, q) in questions.iter().enumerate() {
        body.push_str("<div class=\"card\">\n");
        body.push_str(&format!(
            "<p class=\"muted\">Question {} of {}</p>\n",
            idx + 1,
            questions.len()
        ));
        // Stems and choices carry trusted markup from the question bank.
        body.push_str(&format!("<div class=\"stem\">{}</div>\n", q.stem));
        for (pos, choice) in q.choices.iter().enumerate() {
            let class = if q.correct.as_deref() == Some(choice.id.as_str()) {
                "choice correct"
            } else {
                "choice"
            };
            let letter = (b'A' + (pos % 26) as u8) as char;
            body.push_str(&format!(
                "<div class=\"{class}\"><strong>{letter}.</strong> {}</div>\n",
                choice.text
            ));
        }
        if let Some(label) = q.correct_label {
            body.push_str(&format!(
                "<p><span class=\"badge badge-current\">Correct: {label}</span></p>\n"
            ));
        }
        for (key, text) in &q.feedback {
            if text.is_empty() {
                continue;
            }
            let heading = if key == NEUTRAL_FEEDBACK_KEY {
                "Explanation".to_string()
            } else {
                format!("Feedback for {}", html_escape(key))
            };
            body.push_str(&format!(
                "<div class=\"feedback\"><strong>{heading}:</strong> {text}</div>\n"
            ));
        }
        body.push_str("</div>\n");
    }

    layout(name, &body)
}

/// Normalization diagnostics: warnings, per-question field summary, and
/// the raw document.
pub fn debug_page(
    session: &Session,
    name: &str,
    questions: &[Question],
    warnings: &[ValidationWarning],
    raw: &serde_json::Value,
) -> String {
    let mut body = String::new();
    body.push_str(&user_bar(session));
    body.push_str(&format!(
        "<h1>{} <span class=\"muted\">(debug)</span></h1>\n",
        html_escape(name)
    ));

    body.push_str("<div class=\"card\">\n<h2>Validation</h2>\n");
    if warnings.is_empty() {
        body.push_str("<p class=\"muted\">No warnings.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for w in warnings {
            let id = w.question_id.as_deref().unwrap_or("-");
            body.push_str(&format!(
                "<li class=\"warn\">#{} ({}): {}</li>\n",
                w.index,
                html_escape(id),
                html_escape(&w.message)
            ));
        }
        body.push_str("</ul>\n");
    }
    body.push_str("</div>\n");

    body.push_str("<div class=\"card\">\n<h2>Normalized questions</h2>\n");
    body.push_str("<table>\n<thead><tr><th>#</th><th>ID</th><th>Stem</th><th>Choices</th><th>Correct</th><th>Feedback keys</th></tr></thead>\n<tbody>\n");
    for (idx, q) in questions.iter().enumerate() {
        let stem = quizdeck_core::text::truncate_chars(&quizdeck_core::text::strip_tags(&q.stem), 80);
        let correct = match (&q.correct, q.correct_label) {
            (Some(id), Some(label)) => format!("{} ({label})", html_escape(id)),
            (Some(id), None) => format!("{} (no match)", html_escape(id)),
            (None, _) => "-".to_string(),
        };
        let mut keys: Vec<&str> = q.feedback.keys().map(String::as_str).collect();
        keys.sort_unstable();
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{correct}</td><td class=\"muted\">{}</td></tr>\n",
            idx,
            html_escape(&q.id),
            html_escape(&stem),
            q.choices.len(),
            html_escape(&keys.join(", "))
        ));
    }
    body.push_str("</tbody>\n</table>\n</div>\n");

    body.push_str("<div class=\"card\">\n<h2>Raw document</h2>\n<pre>");
    let pretty = serde_json::to_string_pretty(raw).unwrap_or_else(|_| "{}".to_string());
    body.push_str(&html_escape(&pretty));
    body.push_str("</pre>\n</div>\n");

    layout(name, &body)
}

const PLAYER_JS: &str = r#"
const quizEl = document.getElementById('quiz');
const summaryEl = document.getElementById('summary');
const answers = {};

function feedbackFor(q, choiceId) {
  if (q.feedback[choiceId] !== undefined && q.feedback[choiceId] !== '') return q.feedback[choiceId];
  return q.feedback['neutral'] || '';
}

function render() {
  QUESTIONS.forEach((q, qi) => {
    const card = document.createElement('div');
    card.className = 'card';
    card.id = 'q' + qi;
    const head = document.createElement('p');
    head.className = 'muted';
    head.textContent = 'Question ' + (qi + 1) + ' of ' + QUESTIONS.length;
    card.appendChild(head);
    const stem = document.createElement('div');
    stem.className = 'stem';
    stem.innerHTML = q.stem;
    card.appendChild(stem);
    q.choices.forEach((c, ci) => {
      const el = document.createElement('div');
      el.className = 'choice';
      el.dataset.choiceId = c.id;
      el.innerHTML = '<strong>' + String.fromCharCode(65 + ci) + '.</strong> ' + c.text;
      el.addEventListener('click', () => pick(qi, c.id, el));
      card.appendChild(el);
    });
    const fb = document.createElement('div');
    fb.className = 'feedback';
    fb.id = 'fb' + qi;
    fb.style.display = 'none';
    card.appendChild(fb);
    quizEl.appendChild(card);
  });
}

function pick(qi, choiceId, el) {
  const q = QUESTIONS[qi];
  if (!IS_MOCK && answers[qi] !== undefined) return;
  answers[qi] = choiceId;
  const card = document.getElementById('q' + qi);
  card.querySelectorAll('.choice').forEach(c => c.classList.remove('selected'));
  el.classList.add('selected');
  if (!IS_MOCK) {
    grade(qi);
  } else if (Object.keys(answers).length === QUESTIONS.length) {
    finishMock();
  }
}

function grade(qi) {
  const q = QUESTIONS[qi];
  const card = document.getElementById('q' + qi);
  card.querySelectorAll('.choice').forEach(c => {
    if (c.dataset.choiceId === q.correct) c.classList.add('correct');
    else if (c.dataset.choiceId === answers[qi]) c.classList.add('incorrect');
  });
  const fb = document.getElementById('fb' + qi);
  const text = feedbackFor(q, answers[qi]);
  if (text) {
    fb.innerHTML = text;
    fb.style.display = 'block';
  }
}

function finishMock() {
  QUESTIONS.forEach((q, qi) => grade(qi));
  const correct = QUESTIONS.filter((q, qi) => answers[qi] === q.correct).length;
  const total = QUESTIONS.length;
  const unanswered = total - Object.keys(answers).length;
  const result = {
    quiz_name: QUIZ_NAME,
    score: correct * 5,
    total_questions: total,
    percentage: total ? Math.round(correct / total * 100) : 0,
    correct: correct,
    incorrect: total - correct - unanswered,
    unanswered: unanswered
  };
  summaryEl.style.display = 'block';
  summaryEl.innerHTML = '<h2>Result</h2><p>' + correct + ' / ' + total +
    ' correct (' + result.percentage + '%)</p>';
  fetch('/results', {
    method: 'POST',
    headers: {'Content-Type': 'application/json'},
    body: JSON.stringify(result)
  }).catch(() => {});
}

render();
"#;
