use aisign_core::{Context, OsEnv};
use aisign_file_read_tokio::TokioFileRead;
use aisign_http_send_reqwest::ReqwestHttpSend;

/// Build a context that reads files with tokio, sends requests with reqwest
/// and reads the process environment.
pub fn default_context() -> Context {
    Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv)
}

/// Same as [`default_context`] with a caller configured reqwest client.
pub fn default_context_with_client(client: reqwest::Client) -> Context {
    Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(ReqwestHttpSend::new(client))
        .with_env(OsEnv)
}
