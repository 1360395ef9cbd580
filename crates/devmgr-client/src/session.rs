//! HTTP session wrapper for the web-services API.

use reqwest::RequestBuilder;
use reqwest::header::{ACCEPT, CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue, SET_COOKIE};
use serde::Serialize;
use tracing::{debug, info, instrument, trace};

use crate::auth::{Credentials, SessionToken};
use crate::error::{AuthError, Error};
use crate::types::ServerUrl;

/// Path of the explicit login endpoint.
const LOGIN_PATH: &str = "/devmgr/utils/login";

/// Name of the session cookie issued on login.
const SESSION_COOKIE: &str = "JSESSIONID";

/// Request body for the login endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    user_id: &'a str,
    password: &'a str,
}

/// Error body the login endpoint may return on rejection.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginErrorBody {
    #[serde(default)]
    error_message: Option<String>,
}

/// How a session authenticates its requests.
///
/// The two modes are mutually exclusive by construction. A session-cookie
/// session holds a server-issued token after an explicit login; a
/// basic-auth session re-sends credentials on every request and never
/// stores a token. The server may issue a distinct session id per
/// basic-auth call; those are separate identity streams and are ignored.
enum AuthMode {
    Session { token: Option<SessionToken> },
    Basic { credentials: Credentials },
}

/// A long-lived HTTP client wrapper for one logical run against the API.
///
/// Applies `Accept: application/json` and `Content-Type: application/json`
/// to every request and attaches authentication according to the mode
/// chosen at construction. [`get`] and [`post`] return the raw response;
/// callers interpret domain-specific status codes. The only statuses
/// handled here are 401/403, which map to [`AuthError::Denied`].
///
/// # Usage contract
///
/// One `ApiSession` per logical caller. The type is not designed for
/// concurrent sharing; callers wanting parallelism should create one
/// session each or synchronize externally.
///
/// # Example
///
/// ```no_run
/// use devmgr_client::{ApiSession, Credentials, ServerUrl};
///
/// # async fn example() -> Result<(), devmgr_client::Error> {
/// let server = ServerUrl::new("https://array.example.com:8443")?;
/// let mut session = ApiSession::session_auth(server);
/// session.login(&Credentials::new("rw", "rw-password")).await?;
///
/// let systems = session.list_storage_systems().await?;
/// println!("{} systems monitored", systems.len());
/// # Ok(())
/// # }
/// ```
///
/// [`get`]: ApiSession::get
/// [`post`]: ApiSession::post
pub struct ApiSession {
    server: ServerUrl,
    http: reqwest::Client,
    headers: HeaderMap,
    auth: AuthMode,
}

impl ApiSession {
    /// Create a session-cookie session against the given server.
    ///
    /// The session is not usable until [`login`](ApiSession::login)
    /// succeeds; requests issued before that fail with
    /// [`AuthError::NotLoggedIn`] without any network I/O.
    pub fn session_auth(server: ServerUrl) -> Self {
        Self::new(server, AuthMode::Session { token: None })
    }

    /// Create a basic-auth session against the given server.
    ///
    /// Credentials are attached to every outgoing request; no login call
    /// is needed and no token is ever stored.
    pub fn basic_auth(server: ServerUrl, credentials: Credentials) -> Self {
        Self::new(server, AuthMode::Basic { credentials })
    }

    fn new(server: ServerUrl, auth: AuthMode) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("devmgr/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Self {
            server,
            http,
            headers,
            auth,
        }
    }

    /// Returns the base server URL this session targets.
    pub fn server(&self) -> &ServerUrl {
        &self.server
    }

    /// True once a session-mode login has stored a token.
    ///
    /// Always false in basic-auth mode.
    pub fn is_logged_in(&self) -> bool {
        matches!(
            self.auth,
            AuthMode::Session { token: Some(_) }
        )
    }

    /// Authenticate explicitly and store the issued session token.
    ///
    /// POSTs `{userId, password}` to the login endpoint. On 2xx the
    /// `JSESSIONID` cookie from the response is stored and reused on all
    /// subsequent requests from this session. On any other status the
    /// login fails with [`AuthError::LoginFailed`] carrying the status
    /// and the server-provided message if any.
    ///
    /// # Errors
    ///
    /// Fails with [`AuthError::NotSessionMode`] on a basic-auth session.
    #[instrument(skip(self, credentials), fields(server = %self.server, username = %credentials.username()))]
    pub async fn login(&mut self, credentials: &Credentials) -> Result<(), Error> {
        let AuthMode::Session { token } = &mut self.auth else {
            return Err(AuthError::NotSessionMode.into());
        };

        info!("Logging in");

        let body = LoginRequest {
            user_id: credentials.username(),
            password: credentials.password(),
        };

        let url = self.server.endpoint(LOGIN_PATH);
        let response = self
            .http
            .post(&url)
            .headers(self.headers.clone())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<LoginErrorBody>()
                .await
                .unwrap_or_default()
                .error_message;
            return Err(AuthError::LoginFailed {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let Some(issued) = session_cookie(response.headers()) else {
            return Err(AuthError::LoginFailed {
                status: status.as_u16(),
                message: Some(format!("no {} cookie in login response", SESSION_COOKIE)),
            }
            .into());
        };

        debug!("Session established");
        *token = Some(issued);
        Ok(())
    }

    /// Issue a GET request against an endpoint path.
    ///
    /// Returns the raw response for the caller to interpret, except that
    /// 401/403 become [`AuthError::Denied`].
    #[instrument(skip(self), fields(server = %self.server))]
    pub async fn get(&self, path: &str) -> Result<reqwest::Response, Error> {
        debug!(path, "GET");

        let url = self.server.endpoint(path);
        let request = self.http.get(&url).headers(self.headers.clone());
        let response = self.authenticated(request)?.send().await?;

        self.check_denied(response)
    }

    /// Issue a POST request with a JSON body against an endpoint path.
    ///
    /// Returns the raw response for the caller to interpret, except that
    /// 401/403 become [`AuthError::Denied`].
    #[instrument(skip(self, body), fields(server = %self.server))]
    pub async fn post<B>(&self, path: &str, body: &B) -> Result<reqwest::Response, Error>
    where
        B: Serialize + std::fmt::Debug,
    {
        debug!(path, "POST");
        trace!(?body, "request body");

        let url = self.server.endpoint(path);
        let request = self.http.post(&url).headers(self.headers.clone()).json(body);
        let response = self.authenticated(request)?.send().await?;

        self.check_denied(response)
    }

    /// Attach authentication to an outgoing request per the session mode.
    fn authenticated(&self, request: RequestBuilder) -> Result<RequestBuilder, Error> {
        match &self.auth {
            AuthMode::Session { token: None } => Err(AuthError::NotLoggedIn.into()),
            AuthMode::Session { token: Some(token) } => {
                let cookie = format!("{}={}", SESSION_COOKIE, token.as_str());
                Ok(request.header(COOKIE, cookie))
            }
            AuthMode::Basic { credentials } => Ok(request
                .basic_auth(credentials.username(), Some(credentials.password()))),
        }
    }

    fn check_denied(&self, response: reqwest::Response) -> Result<reqwest::Response, Error> {
        let status = response.status();
        trace!(status = %status, "response");

        match status.as_u16() {
            401 | 403 => Err(AuthError::Denied {
                status: status.as_u16(),
            }
            .into()),
            _ => Ok(response),
        }
    }
}

/// Extract the session cookie from response headers, if present.
///
/// The first matching cookie wins when several `Set-Cookie` headers
/// appear.
fn session_cookie(headers: &HeaderMap) -> Option<SessionToken> {
    for value in headers.get_all(SET_COOKIE) {
        let Ok(value) = value.to_str() else { continue };
        // "JSESSIONID=ABC123; Path=/; HttpOnly" -> "JSESSIONID=ABC123"
        let Some(pair) = value.split(';').next() else {
            continue;
        };
        if let Some((name, token)) = pair.split_once('=') {
            let token = token.trim();
            if name.trim() == SESSION_COOKIE && !token.is_empty() {
                return Some(SessionToken::new(token));
            }
        }
    }
    None
}

// Custom Debug impl that hides the session token
impl std::fmt::Debug for ApiSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mode = match &self.auth {
            AuthMode::Session { .. } => "session",
            AuthMode::Basic { .. } => "basic",
        };
        f.debug_struct("ApiSession")
            .field("server", &self.server)
            .field("auth", &mode)
            .field("token", &"[REDACTED]")
            .finish()
    }
}
