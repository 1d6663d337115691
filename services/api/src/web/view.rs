//! services/api/src/web/view.rs
//!
//! Renders the study planner page from the current session state.
//! Every piece of user-supplied text goes through `html_escape` before it is
//! written into the document. The credential and study-guide bodies are never
//! rendered.

use crate::web::state::AppState;
use axum::{extract::State, response::Html};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;
use std::sync::Arc;
use study_planner_core::store::SessionState;

/// Seconds between automatic reloads while a plan is being generated.
const PENDING_REFRESH_SECS: u32 = 2;

const STYLE: &str = "body{font-family:sans-serif;max-width:56rem;margin:0 auto;padding:1.5rem}\
section{box-shadow:0 1px 4px #0002;border-radius:4px;padding:1.5rem 2rem;margin-bottom:1rem}\
label{display:block;font-weight:bold;margin:.75rem 0 .25rem}\
input{width:100%;padding:.4rem;box-sizing:border-box}\
button{margin-top:1rem;padding:.5rem 1rem;font-weight:bold}\
.error{background:#fee2e2;border:1px solid #f87171;color:#b91c1c;padding:.75rem 1rem;border-radius:4px;margin-bottom:1rem}\
pre{white-space:pre-wrap}";

/// GET `/`: the whole form.
pub async fn index_handler(State(app_state): State<Arc<AppState>>) -> Html<String> {
    let session = app_state.session.read().await;
    Html(render_page(&session))
}

pub fn render_page(session: &SessionState) -> String {
    let mut page = String::with_capacity(4096);
    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    if session.pending_generations() > 0 {
        let _ = writeln!(
            page,
            "<meta http-equiv=\"refresh\" content=\"{}\">",
            PENDING_REFRESH_SECS
        );
    }
    let _ = writeln!(page, "<title>Study Planner</title>\n<style>{}</style>", STYLE);
    page.push_str("</head>\n<body>\n<h1>Study Planner</h1>\n");

    render_test_form(&mut page, session);
    render_test_list(&mut page, session);
    render_plan_form(&mut page, session);
    render_error(&mut page, session);
    render_plan(&mut page, session);

    page.push_str("</body>\n</html>\n");
    page
}

fn render_test_form(page: &mut String, session: &SessionState) {
    let draft = session.draft();
    let guide_status = if draft.study_guide.is_empty() {
        "No study guide loaded yet."
    } else {
        "Study guide loaded."
    };

    let _ = write!(
        page,
        r#"<section>
<h2>Add New Test</h2>
<form method="post" action="/tests" enctype="multipart/form-data">
<label for="testName">Test Name</label>
<input id="testName" type="text" name="name" placeholder="Test Name" value="{name}">
<label for="testDate">Test Date</label>
<input id="testDate" type="date" name="date" value="{date}">
<label for="studyGuide">Study Guide (PDF File Upload)</label>
<input id="studyGuide" type="file" name="study_guide" accept=".pdf,application/pdf">
<p>{guide_status}</p>
<button type="submit" name="intent" value="upload">Upload Study Guide</button>
<button type="submit" name="intent" value="add">Add Test</button>
</form>
</section>
"#,
        name = encode_double_quoted_attribute(&draft.name),
        date = encode_double_quoted_attribute(&draft.date),
        guide_status = guide_status,
    );
}

fn render_test_list(page: &mut String, session: &SessionState) {
    if session.tests().is_empty() {
        return;
    }
    page.push_str("<section>\n<h2>Added Tests</h2>\n");
    for test in session.tests() {
        let _ = writeln!(
            page,
            "<div><strong>{}</strong> - {} - Study Guide Uploaded</div>",
            encode_text(&test.name),
            encode_text(&test.date)
        );
    }
    page.push_str("</section>\n");
}

fn render_plan_form(page: &mut String, session: &SessionState) {
    let key_hint = if session.credential().is_empty() {
        "Enter your OpenAI API key"
    } else {
        "Key stored for this session (leave blank to reuse)"
    };
    let pending = if session.pending_generations() > 0 {
        "<p>Generating your study plan...</p>\n"
    } else {
        ""
    };

    let _ = write!(
        page,
        r#"<section>
<h2>Generate Study Plan</h2>
<form method="post" action="/plan">
<label for="apiKey">OpenAI API Key</label>
<input id="apiKey" type="password" name="api_key" autocomplete="off" placeholder="{key_hint}">
<button type="submit">Generate Study Plan</button>
</form>
{pending}</section>
"#,
        key_hint = key_hint,
        pending = pending,
    );
}

fn render_error(page: &mut String, session: &SessionState) {
    if let Some(message) = session.error_message() {
        let _ = writeln!(
            page,
            "<div class=\"error\" role=\"alert\"><strong>Error:</strong> {}</div>",
            encode_text(message)
        );
    }
}

fn render_plan(page: &mut String, session: &SessionState) {
    if let Some(plan) = session.study_plan() {
        let _ = writeln!(
            page,
            "<section>\n<h2>Your Study Plan</h2>\n<pre>{}</pre>\n</section>",
            encode_text(plan)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_planner_core::{domain::Credential, PlannerError};

    #[test]
    fn empty_session_hides_optional_panels() {
        let page = render_page(&SessionState::new());
        assert!(page.contains("Add New Test"));
        assert!(page.contains("Generate Study Plan"));
        assert!(!page.contains("Added Tests"));
        assert!(!page.contains("role=\"alert\""));
        assert!(!page.contains("Your Study Plan"));
        assert!(!page.contains("http-equiv=\"refresh\""));
    }

    #[test]
    fn added_tests_never_show_guide_text() {
        let mut session = SessionState::new();
        session.set_draft_name("Calc101");
        session.set_draft_date("2024-05-01");
        session.apply_extraction(Ok("secret derivative notes".to_string()));
        session.add_test();

        let page = render_page(&session);
        assert!(page.contains("<strong>Calc101</strong> - 2024-05-01 - Study Guide Uploaded"));
        assert!(!page.contains("secret derivative notes"));
    }

    #[test]
    fn user_text_is_escaped() {
        let mut session = SessionState::new();
        session.set_draft_name("\"><script>alert(1)</script>");
        session.apply_plan_result(Ok("Day 1: <b>limits</b>\n  Day 2: review".to_string()));

        let page = render_page(&session);
        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("Day 1: &lt;b&gt;limits&lt;/b&gt;\n  Day 2: review"));
    }

    #[test]
    fn credential_is_never_echoed() {
        let mut session = SessionState::new();
        session.set_credential(Credential::new("sk-live-123"));
        let page = render_page(&session);
        assert!(!page.contains("sk-live-123"));
        assert!(page.contains("Key stored for this session"));
    }

    #[test]
    fn banner_and_pending_notice() {
        let mut session = SessionState::new();
        session.record_error(&PlannerError::NoTests);
        session.begin_generation();

        let page = render_page(&session);
        assert!(page.contains("Please add at least one test before generating a study plan."));
        assert!(page.contains("http-equiv=\"refresh\""));
        assert!(page.contains("Generating your study plan..."));
    }
}
