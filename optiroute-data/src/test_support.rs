//! Test-only HTTP doubles for `optiroute-data`.
//!
//! [`CannedHttpServer`] listens on a loopback port and answers every request
//! with whatever its responder returns, so the HTTP collaborators can be
//! exercised end to end without an OSRM or Nominatim instance. Gated behind
//! the `test-support` feature (and `cfg(test)`).

use std::io::{self, BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

/// A response served by [`CannedHttpServer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CannedResponse {
    /// HTTP status code.
    pub status: u16,
    /// JSON body.
    pub body: String,
}

impl CannedResponse {
    /// A `200 OK` response carrying `body`.
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self::with_status(200, body)
    }

    /// A response with an explicit status code.
    #[must_use]
    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

type Responder = dyn Fn(&str) -> CannedResponse + Send + Sync;

/// Single-threaded HTTP/1.1 server answering from a closure.
///
/// The responder receives the request target (path and query). Each
/// connection serves one request and is then closed. The server stops when
/// dropped.
///
/// # Examples
/// ```
/// use optiroute_data::test_support::{CannedHttpServer, CannedResponse};
///
/// let server = CannedHttpServer::start(|_| CannedResponse::ok("[]"))?;
/// assert!(server.base_url().starts_with("http://127.0.0.1:"));
/// assert!(server.requests().is_empty());
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct CannedHttpServer {
    address: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
    shutdown: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl CannedHttpServer {
    /// Bind a loopback port and start serving.
    ///
    /// # Errors
    ///
    /// Fails when no port can be bound or the worker thread cannot start.
    pub fn start<F>(responder: F) -> io::Result<Self>
    where
        F: Fn(&str) -> CannedResponse + Send + Sync + 'static,
    {
        let listener = TcpListener::bind(("127.0.0.1", 0))?;
        let address = listener.local_addr()?;
        let requests = Arc::new(Mutex::new(Vec::new()));
        let shutdown = Arc::new(AtomicBool::new(false));
        let responder: Arc<Responder> = Arc::new(responder);

        let seen = Arc::clone(&requests);
        let stop = Arc::clone(&shutdown);
        let worker = thread::Builder::new()
            .name("canned-http".to_owned())
            .spawn(move || serve(&listener, responder.as_ref(), &seen, &stop))?;

        Ok(Self {
            address,
            requests,
            shutdown,
            worker: Some(worker),
        })
    }

    /// Serve the same response to every request.
    ///
    /// # Errors
    ///
    /// See [`start`](Self::start).
    pub fn always(response: CannedResponse) -> io::Result<Self> {
        Self::start(move |_| response.clone())
    }

    /// `http://127.0.0.1:{port}`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.address)
    }

    /// Request targets received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Drop for CannedHttpServer {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        // Wake the accept loop so it observes the flag.
        if let Err(err) = TcpStream::connect(self.address) {
            log::debug!("canned server already stopped: {err}");
        }
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            log::warn!("canned server thread panicked");
        }
    }
}

fn serve(
    listener: &TcpListener,
    responder: &Responder,
    requests: &Mutex<Vec<String>>,
    shutdown: &AtomicBool,
) {
    for incoming in listener.incoming() {
        if shutdown.load(Ordering::SeqCst) {
            break;
        }
        let Ok(mut stream) = incoming else {
            continue;
        };
        let Some(target) = read_request_target(&stream) else {
            continue;
        };
        requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(target.clone());
        let response = responder(&target);
        if let Err(err) = write_response(&mut stream, &response) {
            log::debug!("canned server could not answer {target}: {err}");
        }
    }
}

/// Read the request line and headers, returning the request target.
fn read_request_target(stream: &TcpStream) -> Option<String> {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    loop {
        let mut header = String::new();
        let read = reader.read_line(&mut header).ok()?;
        if read == 0 || header.trim().is_empty() {
            break;
        }
    }
    request_line.split_whitespace().nth(1).map(str::to_owned)
}

fn write_response(stream: &mut TcpStream, response: &CannedResponse) -> io::Result<()> {
    let head = format!(
        "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\
         Connection: close\r\n\r\n",
        response.status,
        response.body.len()
    );
    stream.write_all(head.as_bytes())?;
    stream.write_all(response.body.as_bytes())?;
    stream.flush()
}
