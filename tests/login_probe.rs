use anyhow::{Context, Result, ensure};
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use noma::{
    prober::{HttpProbe, default_candidates, find_reachable_login},
    session::{Logout, LogoutConfig, SESSION_KEYS},
    storage::{FileStorage, MemoryStorage, Storage},
};
use std::{
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};
use tokio::{net::TcpListener, task::JoinHandle};
use url::Url;

const TIMEOUT: Duration = Duration::from_millis(500);

struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl TestServer {
    async fn start(router: Router) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("Failed to bind a local port")?;
        let addr = listener.local_addr().context("Failed to read local port")?;
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        Ok(Self { addr, handle })
    }

    fn page(&self, path: &str) -> Result<Url> {
        Ok(Url::parse(&format!("http://{}{path}", self.addr))?)
    }
}

async fn ok() -> StatusCode {
    StatusCode::OK
}

async fn not_allowed() -> StatusCode {
    StatusCode::METHOD_NOT_ALLOWED
}

async fn broken() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn slow() -> StatusCode {
    tokio::time::sleep(Duration::from_secs(5)).await;
    StatusCode::OK
}

fn owned(candidates: &[&str]) -> Vec<String> {
    candidates.iter().map(ToString::to_string).collect()
}

#[tokio::test]
async fn first_reachable_default_candidate_wins() -> Result<()> {
    let server = TestServer::start(Router::new().route("/auth/login.html", get(ok))).await?;
    let page = server.page("/admin/DashboardsAdmin.html")?;

    let login = find_reachable_login(&HttpProbe::new()?, &page, &default_candidates(), TIMEOUT).await;

    // ../public/login.html answers 404, ../auth/login.html is next.
    ensure!(login == "../auth/login.html", "unexpected login: {login}");
    Ok(())
}

#[tokio::test]
async fn head_405_retries_with_get() -> Result<()> {
    let router = Router::new().route("/login.html", get(ok).head(not_allowed));
    let server = TestServer::start(router).await?;
    let page = server.page("/admin/x.html")?;

    let login = find_reachable_login(
        &HttpProbe::new()?,
        &page,
        &owned(&["/missing.html", "/login.html"]),
        TIMEOUT,
    )
    .await;

    ensure!(login == "/login.html", "unexpected login: {login}");
    Ok(())
}

#[tokio::test]
async fn failed_get_retry_advances() -> Result<()> {
    let router = Router::new()
        .route("/a", get(broken).head(not_allowed))
        .route("/b", get(ok));
    let server = TestServer::start(router).await?;
    let page = server.page("/")?;

    let login =
        find_reachable_login(&HttpProbe::new()?, &page, &owned(&["/a", "/b"]), TIMEOUT).await;

    ensure!(login == "/b", "unexpected login: {login}");
    Ok(())
}

#[tokio::test]
async fn nothing_answers_returns_first_candidate() -> Result<()> {
    let server = TestServer::start(Router::new()).await?;
    let page = server.page("/")?;

    let login =
        find_reachable_login(&HttpProbe::new()?, &page, &owned(&["/a", "/b"]), TIMEOUT).await;

    ensure!(login == "/a", "unexpected login: {login}");
    Ok(())
}

#[tokio::test]
async fn slow_candidate_times_out() -> Result<()> {
    let router = Router::new().route("/slow", get(slow)).route("/fast", get(ok));
    let server = TestServer::start(router).await?;
    let page = server.page("/")?;

    let started = std::time::Instant::now();
    let login = find_reachable_login(
        &HttpProbe::new()?,
        &page,
        &owned(&["/slow", "/fast"]),
        Duration::from_millis(100),
    )
    .await;

    ensure!(login == "/fast", "unexpected login: {login}");
    ensure!(started.elapsed() < Duration::from_secs(4), "probe was not bounded");
    Ok(())
}

#[tokio::test]
async fn unreachable_host_falls_back() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let page = Url::parse(&format!("http://{addr}/admin/x.html"))?;
    let login = find_reachable_login(&HttpProbe::new()?, &page, &default_candidates(), TIMEOUT).await;

    ensure!(login == "../public/login.html", "unexpected login: {login}");
    Ok(())
}

async fn count_logout(State(hits): State<Arc<AtomicUsize>>) -> StatusCode {
    hits.fetch_add(1, Ordering::SeqCst);
    StatusCode::NO_CONTENT
}

async fn failing_logout(State(hits): State<Arc<AtomicUsize>>) -> StatusCode {
    hits.fetch_add(1, Ordering::SeqCst);
    StatusCode::INTERNAL_SERVER_ERROR
}

fn seeded_local(dir: &tempfile::TempDir) -> Result<FileStorage> {
    let local = FileStorage::new(dir.path().join("local.json"));
    for key in SESSION_KEYS {
        local.set_item(key, "secret")?;
    }
    local.set_item("user_noma", "[]")?;
    Ok(local)
}

#[tokio::test]
async fn logout_notifies_server_and_clears_both_stores() -> Result<()> {
    let hits = Arc::new(AtomicUsize::new(0));
    let router = Router::new()
        .route("/api/logout", post(count_logout))
        .route("/public/login.html", get(ok))
        .with_state(hits.clone());
    let server = TestServer::start(router).await?;
    let page = server.page("/admin/usuarioAdmin.html")?;

    let dir = tempfile::tempdir()?;
    let local = seeded_local(&dir)?;
    let session = MemoryStorage::with_items([("token", "t"), ("jwt", "j")]);

    let config = LogoutConfig {
        endpoint: Some("/api/logout".to_string()),
        ..LogoutConfig::default()
    };
    let destination = Logout::new(HttpProbe::new()?, config)?
        .perform(&page, &local, &session)
        .await;

    ensure!(hits.load(Ordering::SeqCst) == 1, "logout endpoint not called once");
    ensure!(
        destination == format!("http://{}/public/login.html", server.addr),
        "unexpected destination: {destination}"
    );
    for key in SESSION_KEYS {
        ensure!(local.get_item(key)?.is_none(), "{key} left in local storage");
        ensure!(session.get_item(key)?.is_none(), "{key} left in session storage");
    }
    ensure!(local.get_item("user_noma")?.is_some(), "directory was removed");
    Ok(())
}

#[tokio::test]
async fn logout_continues_when_server_call_fails() -> Result<()> {
    let hits = Arc::new(AtomicUsize::new(0));
    let router = Router::new()
        .route("/api/logout", post(failing_logout))
        .with_state(hits.clone());
    let server = TestServer::start(router).await?;
    let page = server.page("/admin/x.html")?;

    let dir = tempfile::tempdir()?;
    let local = seeded_local(&dir)?;
    let session = MemoryStorage::new();

    let config = LogoutConfig {
        endpoint: Some("/api/logout".to_string()),
        candidates: owned(&["/nowhere.html"]),
        probe_timeout: TIMEOUT,
    };
    let destination = Logout::new(HttpProbe::new()?, config)?
        .perform(&page, &local, &session)
        .await;

    ensure!(hits.load(Ordering::SeqCst) == 1, "logout endpoint not called");
    ensure!(
        destination == format!("http://{}/nowhere.html", server.addr),
        "unexpected destination: {destination}"
    );
    ensure!(local.get_item("token")?.is_none(), "token left in local storage");
    Ok(())
}
