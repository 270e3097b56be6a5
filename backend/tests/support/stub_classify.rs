//! In-process stand-in for the Classify XML API.
//!
//! Answers `GET /classify` on an ephemeral port with canned documents keyed
//! by the `title` or `owi` parameter, and counts every request.

use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpResponse, HttpServer, web};
use reqwest::Url;

pub const SEARCH_1984: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<classify xmlns="http://classify.oclc.org">
  <response code="4"/>
  <input type="title">1984</input>
  <works>
    <work author="Orwell, George" editions="500" hyr="1949" owi="123" title="1984">123</work>
    <work author="Orwell, George | Fromm, Erich" hyr="2003" owi="456" title="Nineteen eighty-four">456</work>
  </works>
</classify>"#;

pub const LOOKUP_123: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<classify xmlns="http://classify.oclc.org">
  <response code="0"/>
  <work author="Orwell, George" editions="500" hyr="1949" owi="123" title="1984">123</work>
  <recommendations>
    <ddc>
      <mostPopular holdings="9000" nsfa="813" sfa="813"/>
      <mostPopular holdings="12" nsfa="823.912" sfa="823.912"/>
    </ddc>
  </recommendations>
</classify>"#;

pub const LOOKUP_456: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<classify xmlns="http://classify.oclc.org">
  <response code="0"/>
  <work author="Orwell, George | Fromm, Erich" hyr="2003" owi="456" title="Nineteen eighty-four">456</work>
  <recommendations><ddc><mostPopular sfa="920.71"/></ddc></recommendations>
</classify>"#;

/// The single-work answer for "1984" used by the acceptance scenario.
pub const SEARCH_1984_SINGLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<classify xmlns="http://classify.oclc.org">
  <response code="4"/>
  <input type="title">1984</input>
  <works>
    <work author="Orwell" hyr="1950" owi="123" title="1984">123</work>
  </works>
</classify>"#;

const NO_WORKS: &str = r#"<classify xmlns="http://classify.oclc.org"><response code="102"/></classify>"#;

/// Parameter value that makes the stub answer after `SLOW_DELAY`.
pub const SLOW: &str = "slow";
/// Parameter value that makes the stub answer with a non-XML body.
pub const BROKEN: &str = "broken";
/// Parameter value that makes the stub answer 500 with an HTML page.
pub const FAILING: &str = "failing";

const SLOW_DELAY: Duration = Duration::from_secs(2);

struct StubState {
    hits: Arc<AtomicUsize>,
    overrides: HashMap<&'static str, &'static str>,
}

async fn classify(
    state: web::Data<StubState>,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let key = query
        .get("title")
        .or_else(|| query.get("owi"))
        .map(String::as_str)
        .unwrap_or_default();

    if let Some(body) = state.overrides.get(key) {
        return HttpResponse::Ok().content_type("application/xml").body(*body);
    }
    let body = match key {
        "1984" => SEARCH_1984,
        "123" => LOOKUP_123,
        "456" => LOOKUP_456,
        BROKEN => "this is not xml",
        FAILING => {
            return HttpResponse::InternalServerError()
                .content_type("text/html")
                .body("<html><body>Service Unavailable</body></html>");
        }
        SLOW => {
            actix_web::rt::time::sleep(SLOW_DELAY).await;
            NO_WORKS
        }
        _ => NO_WORKS,
    };
    HttpResponse::Ok().content_type("application/xml").body(body)
}

/// Running stub server.
pub struct StubClassify {
    base_url: Url,
    hits: Arc<AtomicUsize>,
    handle: ServerHandle,
}

impl StubClassify {
    /// Bind an ephemeral port and serve on the current actix system.
    pub fn start() -> Self {
        Self::start_with(&[])
    }

    /// Like [`StubClassify::start`], answering `key` with `body` first.
    pub fn start_with(overrides: &[(&'static str, &'static str)]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let addr = listener.local_addr().expect("stub address");
        let hits = Arc::new(AtomicUsize::new(0));
        let state = web::Data::new(StubState {
            hits: Arc::clone(&hits),
            overrides: overrides.iter().copied().collect(),
        });

        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .route("/classify", web::get().to(classify))
        })
        .disable_signals()
        .workers(1)
        .listen(listener)
        .expect("listen on stub socket")
        .run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        let base_url = Url::parse(&format!("http://{addr}/classify")).expect("stub url");
        Self {
            base_url,
            hits,
            handle,
        }
    }

    /// Endpoint to configure the adapter with.
    pub fn base_url(&self) -> Url {
        self.base_url.clone()
    }

    /// Requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Shut the server down.
    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

/// URL on a port nothing listens on.
pub fn refused_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind spare listener");
    let addr = listener.local_addr().expect("spare address");
    drop(listener);
    Url::parse(&format!("http://{addr}/classify")).expect("refused url")
}
