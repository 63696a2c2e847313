use actix_session::Session;
use actix_web::{web, HttpRequest, HttpResponse};
use actix_ws::Message;

use crate::report::DraftSnapshot;
use crate::session::existing_session_key;
use crate::session::registry::DraftRegistry;

/// WebSocket upgrade handler for GET /denunciar/ws.
///
/// Sends the current draft, then one message per change until the client
/// leaves or the draft is discarded.
pub async fn connect(
    req: HttpRequest,
    body: web::Payload,
    session: Session,
    registry: web::Data<DraftRegistry>,
) -> Result<HttpResponse, actix_web::Error> {
    let key = match existing_session_key(&session) {
        Some(key) => key,
        None => return Ok(HttpResponse::Unauthorized().finish()),
    };

    let (response, mut ws_session, mut msg_stream) = actix_ws::handle(&req, body)?;

    let (initial, mut rx) = registry
        .open(&key)
        .with(|store| (store.snapshot(), store.subscribe()));

    actix_web::rt::spawn(async move {
        if ws_session.text(draft_message(&initial)).await.is_err() {
            return;
        }
        loop {
            tokio::select! {
                snapshot = rx.recv() => match snapshot {
                    Some(snapshot) => {
                        if ws_session.text(draft_message(&snapshot)).await.is_err() {
                            break;
                        }
                    }
                    // Draft discarded
                    None => break,
                },
                msg = msg_stream.recv() => match msg {
                    Some(Ok(Message::Ping(bytes))) => {
                        if ws_session.pong(&bytes).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    // Edits arrive over HTTP, not WS
                    Some(Ok(_)) => {}
                },
            }
        }
        let _ = ws_session.close(None).await;
        log::debug!("Draft subscription closed for session {key}");
    });

    Ok(response)
}

fn draft_message(snapshot: &DraftSnapshot) -> String {
    serde_json::json!({
        "type": "draft",
        "draft": snapshot,
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{DraftField, DraftStore};

    #[test]
    fn subscription_frames_carry_the_changed_draft() {
        let mut store = DraftStore::new();
        let initial: serde_json::Value =
            serde_json::from_str(&draft_message(&store.snapshot())).expect("json");
        assert_eq!(initial["type"], "draft");
        assert_eq!(initial["draft"]["isValidContractId"], false);

        let mut rx = store.subscribe();
        store.set(DraftField::ContractId, "CO1.PCCNTR.123456");
        let snapshot = rx.try_recv().expect("change notification");
        let frame: serde_json::Value =
            serde_json::from_str(&draft_message(&snapshot)).expect("json");

        assert_eq!(frame["type"], "draft");
        assert_eq!(frame["draft"]["contractId"], "CO1.PCCNTR.123456");
        assert_eq!(frame["draft"]["isValidContractId"], true);
        assert_eq!(frame["draft"]["revision"], 1);
    }
}
