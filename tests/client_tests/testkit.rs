//! Test support: an in-process fake server speaking scripted RESP2.
//!
//! Each [`Session`] describes how one accepted connection behaves. After the
//! script is exhausted the server keeps accepting so a buggy extra
//! reconnect attempt is observed rather than refused; [`FakeServer::finish`]
//! unblocks that loop with a sentinel connection and returns the log.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

use redwire::Config;

/// First byte of the sentinel connection sent by `finish`; never a valid
/// RESP prefix from this client (commands always start with `*`).
const SENTINEL: u8 = 0xff;

/// Scripted behavior for one accepted connection
pub enum Session {
    /// Accept and close immediately without serving anything
    Drop,

    /// Read one command frame per canned reply, writing the reply after
    /// each, then drain (recording any further frames) until the peer
    /// closes
    Serve(Vec<Vec<u8>>),
}

/// What the fake server observed
pub struct ServerLog {
    /// Total connections accepted, sentinel excluded
    pub accepted: usize,

    /// Argument lists of every command frame received, in arrival order
    pub frames: Vec<Vec<String>>,
}

pub struct FakeServer {
    port: u16,
    handle: thread::JoinHandle<ServerLog>,
}

impl FakeServer {
    /// Bind an ephemeral port and run the scripted sessions on a thread
    pub fn start(sessions: Vec<Session>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind fake server");
        let port = listener.local_addr().expect("local addr").port();

        let handle = thread::spawn(move || {
            let mut log = ServerLog {
                accepted: 0,
                frames: Vec::new(),
            };

            for session in sessions {
                let (stream, _) = listener.accept().expect("accept scripted session");
                log.accepted += 1;
                run_session(stream, session, &mut log);
            }

            // Count any unscripted extra connections until the sentinel.
            loop {
                let (mut stream, _) = listener.accept().expect("accept sentinel");
                let mut first = [0u8; 1];
                match stream.read(&mut first) {
                    Ok(1) if first[0] != SENTINEL => log.accepted += 1,
                    _ => break,
                }
            }

            log
        });

        Self { port, handle }
    }

    /// Client configuration pointing at this server
    pub fn config(&self) -> Config {
        Config::builder().port(self.port).build()
    }

    /// Unblock the accept loop and collect the observation log
    pub fn finish(self) -> ServerLog {
        let mut stream =
            TcpStream::connect(("127.0.0.1", self.port)).expect("connect sentinel");
        stream.write_all(&[SENTINEL]).expect("write sentinel");
        drop(stream);
        self.handle.join().expect("join fake server")
    }
}

fn run_session(stream: TcpStream, session: Session, log: &mut ServerLog) {
    match session {
        Session::Drop => drop(stream),
        Session::Serve(replies) => {
            let mut writer = stream.try_clone().expect("clone stream");
            let mut reader = BufReader::new(stream);

            for reply in replies {
                match read_frame(&mut reader) {
                    Some(args) => log.frames.push(args),
                    None => return,
                }
                writer.write_all(&reply).expect("write reply");
                writer.flush().expect("flush reply");
            }

            // Drain trailing frames (e.g. a best-effort QUIT) until close.
            while let Some(args) = read_frame(&mut reader) {
                log.frames.push(args);
            }
        }
    }
}

/// Read one multibulk command frame, returning its arguments as text
fn read_frame<R: BufRead>(reader: &mut R) -> Option<Vec<String>> {
    let argc = read_header(reader, b'*')?;
    let mut args = Vec::with_capacity(argc as usize);
    for _ in 0..argc {
        let len = read_header(reader, b'$')?;
        let mut payload = vec![0u8; len as usize];
        reader.read_exact(&mut payload).ok()?;
        let mut crlf = [0u8; 2];
        reader.read_exact(&mut crlf).ok()?;
        args.push(String::from_utf8_lossy(&payload).into_owned());
    }
    Some(args)
}

fn read_header<R: BufRead>(reader: &mut R, prefix: u8) -> Option<i64> {
    let mut line = Vec::new();
    let read = reader.read_until(b'\n', &mut line).ok()?;
    if read == 0 || line.first() != Some(&prefix) || line.len() < 3 {
        return None;
    }
    std::str::from_utf8(&line[1..line.len() - 2])
        .ok()?
        .parse()
        .ok()
}
