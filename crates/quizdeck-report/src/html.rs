//! HTML page generator.
//!
//! Produces a self-contained HTML file with all CSS inlined. Class names
//! follow the original quiz pages so existing stylesheets keep working.

use anyhow::Result;
use std::path::Path;

use quizdeck_core::scoring::ScoreCard;
use quizdeck_core::view::{nav_totals, NavButton, QuestionView};

/// Everything that goes on one rendered page.
#[derive(Debug, Clone, Copy)]
pub struct HtmlPage<'a> {
    pub title: &'a str,
    pub questions: &'a [QuestionView],
    pub nav: &'a [NavButton],
    /// Present once the session has been checked.
    pub card: Option<&'a ScoreCard>,
}

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML page for a session.
pub fn generate_html(page: &HtmlPage<'_>) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>quizdeck — {}</title>\n",
        html_escape(page.title)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(page.title)));
    html.push_str(&format!(
        "<p class=\"meta\">{} questions in this session | {} in the bank</p>\n",
        page.questions.len(),
        page.nav.len()
    ));
    html.push_str("</header>\n");

    if let Some(card) = page.card {
        html.push_str(&score_section(card));
    }

    html.push_str(&nav_section(page.nav));

    // Question blocks
    html.push_str("<section id=\"questions-container\">\n");
    for q in page.questions {
        html.push_str(&question_block(q));
    }
    html.push_str("</section>\n");

    if let Some(card) = page.card {
        html.push_str("<section class=\"raw-data\">\n");
        html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
        html.push_str("<pre><code>");
        html.push_str(&html_escape(
            &serde_json::to_string_pretty(card).unwrap_or_default(),
        ));
        html.push_str("</code></pre>\n");
        html.push_str("</details>\n</section>\n");
    }

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML page to a file.
pub fn write_html_report(page: &HtmlPage<'_>, path: &Path) -> Result<()> {
    let html = generate_html(page);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn question_block(q: &QuestionView) -> String {
    let mut block = String::new();
    let flagged = if q.flagged_incorrect {
        " previously-incorrect"
    } else {
        ""
    };
    block.push_str(&format!(
        "<div class=\"question{flagged}\" id=\"question-{}\">\n",
        html_escape(q.id.as_str())
    ));
    block.push_str(&format!(
        "<h3>{}. {}</h3>\n",
        q.position,
        html_escape(&q.heading)
    ));
    if !q.body.is_empty() {
        block.push_str(&format!("<p>{}</p>\n", html_escape(&q.body)));
    }
    if q.flagged_incorrect {
        block.push_str("<p class=\"flag\">Answered incorrectly last time.</p>\n");
    }
    block.push_str("<ul class=\"answers\">\n");
    for o in &q.options {
        let class = o.mark.css_class();
        let class_attr = if class.is_empty() {
            "answer".to_string()
        } else {
            format!("answer {class}")
        };
        block.push_str(&format!(
            "<li class=\"{class_attr}\"><span class=\"label\">{})</span> {}</li>\n",
            o.label,
            html_escape(&o.text)
        ));
    }
    block.push_str("</ul>\n</div>\n");
    block
}

fn nav_section(nav: &[NavButton]) -> String {
    let mut section = String::new();
    let (correct, incorrect, unanswered, never) = nav_totals(nav);

    section.push_str("<nav id=\"question-nav\">\n");
    section.push_str(&format!(
        "<p class=\"meta\">{correct} correct | {incorrect} incorrect | {unanswered} unanswered | {never} not attempted</p>\n"
    ));
    for b in nav {
        let status = b
            .status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "not attempted".to_string());
        section.push_str(&format!(
            "<button class=\"btn {}\" title=\"{}\">{}</button>\n",
            b.style.css_class(),
            status,
            html_escape(b.id.as_str())
        ));
    }
    section.push_str("</nav>\n");
    section
}

fn score_section(card: &ScoreCard) -> String {
    let class = match card.verdict {
        quizdeck_core::scoring::Verdict::Pass => "pass",
        quizdeck_core::scoring::Verdict::Fail => "fail",
    };
    let mut section = String::new();
    section.push_str(&format!("<section class=\"score {class}\">\n"));
    section.push_str("<h2>Result</h2>\n");
    section.push_str("<table class=\"summary\">\n");
    section.push_str("<thead><tr><th>Correct</th><th>Incorrect</th><th>Unanswered</th><th>Score</th></tr></thead>\n");
    section.push_str(&format!(
        "<tbody><tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr></tbody>\n",
        card.correct, card.incorrect, card.unanswered, card.score
    ));
    section.push_str("</table>\n");
    section.push_str(&format!("<p class=\"verdict\">{}</p>\n", card.verdict.message()));
    section.push_str("</section>\n");
    section
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; --muted: #6b7280; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: var(--muted); }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
.question { border: 1px solid var(--border); border-radius: 8px; padding: 1rem; margin: 1rem 0; }
.previously-incorrect { border-color: #ef4444; }
.flag { color: #ef4444; font-size: 0.85rem; }
.answers { list-style: none; padding: 0; }
.answer { padding: 0.4rem 0.8rem; margin: 0.25rem 0; border-radius: 6px; border: 1px solid var(--border); }
.answer.active { border-color: #3b82f6; background: #dbeafe; color: #1a1a1a; }
.answer.selected-correct { background: #22c55e; color: #fff; }
.answer.selected-wrong { background: #ef4444; color: #fff; }
.answer.should-select { border: 2px dashed #22c55e; }
.label { font-weight: bold; margin-right: 0.25rem; }
#question-nav { display: flex; flex-wrap: wrap; gap: 0.25rem; margin: 1rem 0; }
#question-nav .meta { flex-basis: 100%; }
.btn { min-width: 2.5rem; padding: 0.25rem 0.5rem; border-radius: 4px; border: 1px solid #6b7280; background: transparent; color: inherit; }
.btn-success { background: #22c55e; border-color: #22c55e; color: #fff; }
.btn-danger { background: #ef4444; border-color: #ef4444; color: #fff; }
.btn-secondary { background: #6b7280; color: #fff; }
.btn-outline-secondary { background: transparent; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use quizdeck_core::model::{
        AnswerOption, Question, QuestionBank, QuestionId, QuestionStatus, StatusMap,
    };
    use quizdeck_core::scoring::ScoringRule;
    use quizdeck_core::session::{QuizSession, SessionQuestion};
    use quizdeck_core::view::{nav_panel, question_views};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bank() -> QuestionBank {
        QuestionBank::new(
            (1..=3)
                .map(|i| Question {
                    id: QuestionId::from(i),
                    heading: format!("Is {i} < 2?"),
                    body: String::new(),
                    answers: vec![AnswerOption::new("A", "yes"), AnswerOption::new("B", "no")],
                    correct: if i < 2 { "A".into() } else { "B".into() },
                })
                .collect(),
        )
    }

    fn session(bank: &QuestionBank, statuses: &StatusMap) -> QuizSession {
        let mut rng = StdRng::seed_from_u64(3);
        let questions = bank
            .iter()
            .map(|q| SessionQuestion::present(q.clone(), statuses.get(&q.id).copied(), &mut rng))
            .collect();
        QuizSession::with_questions("/demo", questions, ScoringRule::default())
    }

    #[test]
    fn page_contains_questions_and_nav() {
        let bank = bank();
        let mut statuses = StatusMap::new();
        statuses.insert(QuestionId::from(2), QuestionStatus::Incorrect);

        let s = session(&bank, &statuses);
        let views = question_views(&s);
        let nav = nav_panel(&bank, &statuses);
        let html = generate_html(&HtmlPage {
            title: "/demo",
            questions: &views,
            nav: &nav,
            card: None,
        });

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("Is 1 &lt; 2?"));
        assert!(html.contains("btn btn-danger"));
        assert!(html.contains("btn btn-outline-secondary"));
        assert!(html.contains("previously-incorrect"));
        assert!(!html.contains("class=\"verdict\""));
    }

    #[test]
    fn checked_page_shows_marks_and_verdict() {
        let bank = bank();
        let mut statuses = StatusMap::new();
        let mut s = session(&bank, &statuses);
        let right = s.questions()[0].correct_label().unwrap();
        s.select(0, right).unwrap();
        let card = s.check(&mut statuses);

        let views = question_views(&s);
        let nav = nav_panel(&bank, &statuses);
        let html = generate_html(&HtmlPage {
            title: "/demo",
            questions: &views,
            nav: &nav,
            card: Some(&card),
        });

        assert!(html.contains("answer selected-correct"));
        assert!(html.contains("answer should-select"));
        assert!(html.contains(card.verdict.message()));
        assert!(html.contains("btn btn-success"));
        assert!(html.contains("btn btn-secondary"));
    }

    #[test]
    fn escapes_markup_in_text() {
        assert_eq!(
            html_escape("<b>\"a\" & 'b'</b>"),
            "&lt;b&gt;&quot;a&quot; &amp; &#x27;b&#x27;&lt;/b&gt;"
        );
    }

    #[test]
    fn write_to_file() {
        let bank = bank();
        let statuses = StatusMap::new();
        let s = session(&bank, &statuses);
        let views = question_views(&s);
        let nav = nav_panel(&bank, &statuses);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("page.html");
        write_html_report(
            &HtmlPage {
                title: "/demo",
                questions: &views,
                nav: &nav,
                card: None,
            },
            &path,
        )
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("questions-container"));
    }
}
