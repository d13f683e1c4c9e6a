use std::time::Duration;

use axum::{http::StatusCode, routing::post, Json, Router};
use cyberquiz::coordinator::Completion;
use cyberquiz::generator::{GenerationFailed, HttpGenerator, ParamValue};
use cyberquiz::page::{GRC_WIZARD, SCENARIO_SPHERE};
use cyberquiz::{drive, Session};
use serde_json::{json, Value};
use tokio::sync::Mutex;

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api", addr)
}

fn generator(base: &str) -> HttpGenerator {
    HttpGenerator::new(base, Duration::from_secs(5)).unwrap()
}

async fn grc_question(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body != json!({"category": "Audit", "difficulty": "Hard"}) {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": format!("unexpected body {}", body)})));
    }
    (
        StatusCode::OK,
        Json(json!({
            "question": "Who should perform an independent audit?",
            "options": ["Process owner", "Internal audit", "External auditor", "Vendor"],
            "correct_answer_index": 2,
            "explanations": {
                "0": "Owners cannot audit themselves.",
                "1": "Internal audit is not fully independent.",
                "2": "External auditors are independent.",
                "3": "Vendors have a conflict of interest."
            },
            "exam_tip": "Independence comes from outside."
        })),
    )
}

async fn audit_session(base: &str) -> Mutex<Session> {
    let mut session = Session::new(&GRC_WIZARD);
    session.set_field("category", ParamValue::Text("Audit".into())).unwrap();
    session.set_field("difficulty", ParamValue::Text("Hard".into())).unwrap();
    let session = Mutex::new(session);
    let outcome = drive(&session, &generator(base)).await;
    assert_eq!(outcome, Ok(Some(Completion::Applied)));
    session
}

#[tokio::test]
async fn grc_question_is_graded_against_the_server_answer() {
    let base = serve(Router::new().route("/api/grc/generate_question", post(grc_question))).await;

    let session = audit_session(&base).await;
    let mut s = session.lock().await;
    assert!(s.error().is_none(), "{:?}", s.error());
    assert_eq!(s.run().unwrap().set().questions[0].options.len(), 4);
    assert!(s.answer(0, "2").unwrap().is_correct);

    let session = audit_session(&base).await;
    let mut s = session.lock().await;
    let fb = s.answer(0, "0").unwrap();
    assert!(!fb.is_correct);
    assert_eq!(fb.explanation, "Owners cannot audit themselves.");
    assert_eq!(fb.exam_tip.as_deref(), Some("Independence comes from outside."));
}

#[tokio::test]
async fn server_error_message_is_reported() {
    let app = Router::new().route(
        "/api/grc/generate_question",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "rate limited"})),
            )
        }),
    );
    let base = serve(app).await;

    let session = Mutex::new(Session::new(&GRC_WIZARD));
    drive(&session, &generator(&base)).await.unwrap();

    let s = session.lock().await;
    assert_eq!(
        s.error(),
        Some(&GenerationFailed::new(Some("rate limited".to_string())))
    );
    assert!(s.trigger_enabled());
}

#[tokio::test]
async fn error_without_json_body_has_no_message() {
    let app = Router::new().route(
        "/api/grc/generate_question",
        post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
    );
    let base = serve(app).await;

    let session = Mutex::new(Session::new(&GRC_WIZARD));
    drive(&session, &generator(&base)).await.unwrap();
    assert_eq!(session.lock().await.error(), Some(&GenerationFailed::new(None)));
}

#[tokio::test]
async fn unreachable_server_is_a_generation_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let session = Mutex::new(Session::new(&GRC_WIZARD));
    drive(&session, &generator(&format!("http://{}/api", addr)))
        .await
        .unwrap();

    let s = session.lock().await;
    assert_eq!(s.error(), Some(&GenerationFailed::new(None)));
    assert!(s.trigger_enabled());
}

#[tokio::test]
async fn scenario_request_carries_every_field() {
    let app = Router::new().route(
        "/api/scenario/generate_scenario",
        post(|Json(body): Json<Value>| async move {
            let ok = body
                == json!({
                    "industry": "Healthcare",
                    "attack_type": "Ransomware",
                    "skill_level": "APT",
                    "threat_intensity": 80
                });
            if !ok {
                return (StatusCode::BAD_REQUEST, Json(json!({"error": "bad body"})));
            }
            (
                StatusCode::OK,
                Json(json!({
                    "scenario": "A regional hospital loses access to patient records.",
                    "interactive_questions": [{
                        "question": "What should be done first?",
                        "options": {"A": "Pay", "B": "Isolate", "C": "Wipe", "D": "Wait"},
                        "correct_answer": "B",
                        "explanation": "Containment limits the spread."
                    }]
                })),
            )
        }),
    );
    let base = serve(app).await;

    let mut session = Session::new(&SCENARIO_SPHERE);
    session.set_field("industry", ParamValue::Text("Healthcare".into())).unwrap();
    session.type_text("attack_type", "ransom").unwrap();
    assert_eq!(
        session.click_suggestion("attack_type", "Ransomware").as_deref(),
        Some("Ransomware")
    );
    session.set_field("skill_level", ParamValue::Text("APT".into())).unwrap();
    session.set_field("threat_intensity", ParamValue::Int(80)).unwrap();
    let session = Mutex::new(session);

    drive(&session, &generator(&base)).await.unwrap();
    let mut s = session.lock().await;
    assert!(s.error().is_none(), "{:?}", s.error());
    assert_eq!(
        s.run().unwrap().set().context.as_deref(),
        Some("A regional hospital loses access to patient records.")
    );
    let fb = s.answer(0, "A").unwrap();
    assert!(!fb.is_correct);
    assert_eq!(fb.explanation, "Containment limits the spread.");
}
