//! End-to-end command runs against an in-memory IAM service

use iamctl::commands::Paging;
use iamctl::commands::groups::AddUserToGroup;
use iamctl::commands::users::{GetUser, GetUserList, RemoveUser};
use iamctl::config::ConfirmMode;
use iamctl::output::OutputFormat;
use iamctl::session::{Session, Streams, Summary};
use iamctl_core::request::{AddUserToGroupRequest, DeleteUserRequest, GetUserRequest};
use iamctl_core::response::{
    AddUserToGroupResponse, DeleteUserResponse, GetUserResponse, ListUsersResponse,
};
use iamctl_core::{ConnectionSettings, IamCommand, IamRequest, ServiceError, TerminalConfirm};
use iamctl_test_utils::{RecordingIamService, fixtures};
use std::io::Cursor;

/// Captured output of one run
struct Captured {
    summary: anyhow::Result<Summary>,
    out: String,
    err: String,
}

async fn run_with<C: IamCommand>(
    session: &Session<iamctl_test_utils::RecordingFactory>,
    command: C,
    stdin: &str,
) -> Captured {
    let mut pipeline = Cursor::new(stdin.as_bytes().to_vec());
    let mut out = Vec::new();
    let mut err = Vec::new();
    let summary = {
        let mut streams = Streams {
            pipeline: &mut pipeline,
            out: &mut out,
            err: &mut err,
        };
        session.execute(command, &mut streams).await
    };
    Captured {
        summary,
        out: String::from_utf8(out).unwrap(),
        err: String::from_utf8(err).unwrap(),
    }
}

fn session(
    service: &RecordingIamService,
    mode: ConfirmMode,
    format: OutputFormat,
) -> Session<iamctl_test_utils::RecordingFactory> {
    Session::new(
        ConnectionSettings {
            region: Some("eu-west-1".to_string()),
            ..Default::default()
        },
        service.factory(),
        mode,
        format,
    )
}

#[tokio::test]
async fn get_user_without_name_sends_absent_parameter() {
    let service = RecordingIamService::answering(GetUserResponse {
        user: fixtures::user("caller"),
    });
    let session = session(&service, ConfirmMode::Prompt, OutputFormat::Json);

    let run = run_with(&session, GetUser { user_name: None }, "").await;

    assert_eq!(run.summary.unwrap().succeeded, 1);
    assert_eq!(
        service.requests(),
        vec![IamRequest::GetUser(GetUserRequest { user_name: None })]
    );
    assert!(run.out.contains("\"user_name\": \"caller\""));
}

#[tokio::test]
async fn piped_names_produce_one_invocation_each() {
    let service = RecordingIamService::new(|request| match request {
        IamRequest::GetUser(GetUserRequest { user_name }) => Ok(GetUserResponse {
            user: fixtures::user(user_name.as_deref().unwrap_or("caller")),
        }
        .into()),
        other => panic!("unexpected request {other:?}"),
    });
    let session = session(&service, ConfirmMode::Prompt, OutputFormat::Text);

    let run = run_with(
        &session,
        GetUser {
            user_name: Some("-".to_string()),
        },
        "alice\n\n  bob  \ncarol\n",
    )
    .await;

    assert_eq!(run.summary.unwrap().succeeded, 3);
    let names: Vec<_> = service
        .requests()
        .into_iter()
        .map(|r| match r {
            IamRequest::GetUser(GetUserRequest { user_name }) => user_name.unwrap(),
            other => panic!("unexpected request {other:?}"),
        })
        .collect();
    assert_eq!(names, ["alice", "bob", "carol"]);
    assert!(run.out.contains("user_name: bob"));
}

#[tokio::test]
async fn what_if_never_calls_the_service() {
    let service = RecordingIamService::answering(DeleteUserResponse {});
    let session = session(&service, ConfirmMode::WhatIf, OutputFormat::Table);

    let run = run_with(
        &session,
        RemoveUser {
            user_name: "-".to_string(),
            pass_thru: true,
        },
        "alice\nbob\n",
    )
    .await;

    let summary = run.summary.unwrap();
    assert_eq!(summary.declined, 2);
    assert!(summary.is_success());
    assert_eq!(service.call_count(), 0);
    assert!(service.created_clients().is_empty());
    assert!(run.out.is_empty());
}

#[tokio::test]
async fn declined_prompt_skips_the_call() {
    let service = RecordingIamService::answering(DeleteUserResponse {});
    let session = session(&service, ConfirmMode::Prompt, OutputFormat::Text)
        .with_confirm(TerminalConfirm::new(Cursor::new(b"n\n".to_vec()), Vec::new()));

    let run = run_with(
        &session,
        RemoveUser {
            user_name: "alice".to_string(),
            pass_thru: false,
        },
        "",
    )
    .await;

    assert_eq!(run.summary.unwrap().declined, 1);
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn accepted_prompt_issues_the_call() {
    let service = RecordingIamService::answering(DeleteUserResponse {});
    let session = session(&service, ConfirmMode::Prompt, OutputFormat::Text)
        .with_confirm(TerminalConfirm::new(Cursor::new(b"yes\n".to_vec()), Vec::new()));

    let run = run_with(
        &session,
        RemoveUser {
            user_name: "alice".to_string(),
            pass_thru: false,
        },
        "",
    )
    .await;

    assert_eq!(run.summary.unwrap().succeeded, 1);
    assert_eq!(
        service.requests(),
        vec![IamRequest::DeleteUser(DeleteUserRequest {
            user_name: "alice".to_string()
        })]
    );
    assert!(run.out.is_empty());
}

#[tokio::test]
async fn piped_mutation_requires_force_or_what_if() {
    let service = RecordingIamService::answering(DeleteUserResponse {});
    let session = session(&service, ConfirmMode::Prompt, OutputFormat::Text);

    let run = run_with(
        &session,
        RemoveUser {
            user_name: "-".to_string(),
            pass_thru: false,
        },
        "alice\n",
    )
    .await;

    let err = run.summary.unwrap_err().to_string();
    assert!(err.contains("--force"), "{err}");
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn forced_pass_thru_writes_identifiers() {
    let service = RecordingIamService::answering(AddUserToGroupResponse {});
    let session = session(&service, ConfirmMode::Force, OutputFormat::Text);

    let run = run_with(
        &session,
        AddUserToGroup {
            user_name: "-".to_string(),
            group_name: "admins".to_string(),
            pass_thru: true,
        },
        "alice\nbob\n",
    )
    .await;

    assert_eq!(run.summary.unwrap().succeeded, 2);
    assert_eq!(run.out, "alice\nbob\n");
    assert_eq!(
        service.requests()[1],
        IamRequest::AddUserToGroup(AddUserToGroupRequest {
            user_name: "bob".to_string(),
            group_name: "admins".to_string(),
        })
    );
}

#[tokio::test]
async fn service_errors_are_reported_and_counted() {
    let service = RecordingIamService::new(|request| match request {
        IamRequest::GetUser(GetUserRequest {
            user_name: Some(name),
        }) if name == "ghost" => Err(ServiceError::Service {
            operation: request.operation(),
            code: Some("NoSuchEntity".to_string()),
            message: "The user with name ghost cannot be found.".to_string(),
        }),
        IamRequest::GetUser(GetUserRequest { user_name }) => Ok(GetUserResponse {
            user: fixtures::user(user_name.as_deref().unwrap_or("caller")),
        }
        .into()),
        other => panic!("unexpected request {other:?}"),
    });
    let session = session(&service, ConfirmMode::Prompt, OutputFormat::Text);

    let run = run_with(
        &session,
        GetUser {
            user_name: Some("-".to_string()),
        },
        "ghost\nalice\n",
    )
    .await;

    let summary = run.summary.unwrap();
    assert_eq!((summary.succeeded, summary.failed), (1, 1));
    assert!(!summary.is_success());
    assert!(run.err.contains("Error: GetUser failed: The user with name ghost"));
    assert!(run.err.contains("Code: NoSuchEntity"));
    assert!(run.out.contains("user_name: alice"));
}

#[tokio::test]
async fn name_resolution_failures_name_the_region() {
    let service = RecordingIamService::new(|request| {
        Err(ServiceError::Transport {
            operation: request.operation(),
            kind: iamctl_core::TransportKind::NameResolution,
            message: "dns error: failed to lookup address information".to_string(),
        })
    });
    let session = session(&service, ConfirmMode::Prompt, OutputFormat::Text);

    let run = run_with(&session, GetUser { user_name: None }, "").await;

    assert_eq!(run.summary.unwrap().failed, 1);
    assert!(run.err.contains("region 'eu-west-1'"), "{}", run.err);
}

#[tokio::test]
async fn truncated_listing_prints_marker_hint() {
    let service = RecordingIamService::answering(ListUsersResponse {
        users: vec![fixtures::user("alice")],
        is_truncated: true,
        marker: Some("page-2".to_string()),
    });
    let session = session(&service, ConfirmMode::Prompt, OutputFormat::Table);

    let run = run_with(
        &session,
        GetUserList {
            path_prefix: None,
            paging: Paging::default(),
        },
        "",
    )
    .await;

    assert_eq!(run.summary.unwrap().succeeded, 1);
    assert!(run.out.contains("alice"));
    assert!(run.err.contains("--marker page-2"));
}

#[tokio::test]
async fn full_response_renders_the_whole_response() {
    let service = RecordingIamService::answering(ListUsersResponse {
        users: vec![fixtures::user("alice")],
        is_truncated: false,
        marker: None,
    });
    let session =
        session(&service, ConfirmMode::Prompt, OutputFormat::Json).with_full_response(true);

    let run = run_with(
        &session,
        GetUserList {
            path_prefix: None,
            paging: Paging::default(),
        },
        "",
    )
    .await;

    run.summary.unwrap();
    let value: serde_json::Value = serde_json::from_str(&run.out).unwrap();
    assert_eq!(value["is_truncated"], false);
    assert_eq!(value["users"][0]["user_name"], "alice");
    assert!(run.err.is_empty());
}

#[tokio::test]
async fn one_client_serves_every_invocation() {
    let service = RecordingIamService::answering(GetUserResponse {
        user: fixtures::user("alice"),
    });
    let session = session(&service, ConfirmMode::Prompt, OutputFormat::Json);

    run_with(
        &session,
        GetUser {
            user_name: Some("-".to_string()),
        },
        "a\nb\nc\n",
    )
    .await
    .summary
    .unwrap();
    run_with(&session, GetUser { user_name: None }, "").await.summary.unwrap();

    assert_eq!(service.call_count(), 4);
    let clients = service.created_clients();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].region.as_deref(), Some("eu-west-1"));
}

#[tokio::test]
async fn empty_pipeline_is_a_binding_error() {
    let service = RecordingIamService::answering(GetUserResponse {
        user: fixtures::user("alice"),
    });
    let session = session(&service, ConfirmMode::Prompt, OutputFormat::Json);

    let run = run_with(
        &session,
        GetUser {
            user_name: Some("-".to_string()),
        },
        "\n\n",
    )
    .await;

    assert!(run.summary.is_err());
    assert_eq!(service.call_count(), 0);
}
