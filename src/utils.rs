// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::Instant;
use tokio::time::sleep;

use crate::error::Fallible;
use crate::error::fail;

/// The stylesheet is served from a fixed path, so it is only cached for an
/// hour.
pub const CACHE_CONTROL_STYLESHEET: &str = "public, max-age=3600";

const STARTUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Wait until the server accepts connections.
pub async fn wait_for_server(host: &str, port: u16) -> Fallible<()> {
    wait_for_server_within(host, port, STARTUP_TIMEOUT).await
}

async fn wait_for_server_within(host: &str, port: u16, timeout: Duration) -> Fallible<()> {
    let address = format!("{host}:{port}");
    let deadline = Instant::now() + timeout;
    while TcpStream::connect(&address).await.is_err() {
        if Instant::now() >= deadline {
            return fail(format!("server at {address} did not start."));
        }
        sleep(Duration::from_millis(5)).await;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use portpicker::pick_unused_port;
    use tokio::net::TcpListener;

    use super::*;

    #[tokio::test]
    async fn test_wait_for_listening_server() -> Fallible<()> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();
        wait_for_server("127.0.0.1", port).await
    }

    #[tokio::test]
    async fn test_wait_times_out() {
        let port = pick_unused_port().unwrap();
        let result = wait_for_server_within("127.0.0.1", port, Duration::from_millis(50)).await;
        assert!(result.is_err());
    }
}
