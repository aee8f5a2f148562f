//! Test utilities and fixtures

#[cfg(test)]
pub mod test_helpers {
    use serde_json::json;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    pub fn create_temp_dir() -> TempDir {
        tempfile::tempdir().expect("Failed to create temp dir")
    }

    pub fn create_temp_file_with_content(dir: &TempDir, filename: &str, content: &[u8]) -> PathBuf {
        let file_path = dir.path().join(filename);
        std::fs::write(&file_path, content).expect("Failed to write temp file");
        file_path
    }

    pub fn event_json(id: i64, name: &str, status: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "start_date": "2024-06-15",
            "location": "Central Park, NY",
            "status": status,
            "created_at": "2024-06-01T10:00:00",
            "updated_at": "2024-06-01T10:00:00"
        })
    }

    pub fn collection_json(id: i64, name: &str, event_id: i64) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "event_id": event_id,
            "created_at": "2024-06-01T10:00:00",
            "updated_at": "2024-06-01T10:00:00"
        })
    }

    pub fn photo_json(id: i64, event_id: i64, file_size: Option<u64>) -> serde_json::Value {
        json!({
            "id": id,
            "title": format!("photo-{}", id),
            "url": format!("https://cdn.snapvault.io/{}.jpg", id),
            "event_id": event_id,
            "file_size": file_size
        })
    }

    /// Studio settings in the shape the backend answers with: `id` plus
    /// every profile field, no ownership or timestamps
    pub fn studio_settings_json(id: i64, company: &str) -> serde_json::Value {
        json!({
            "full_name": "Asha Sen",
            "mobile_number": null,
            "email_id": "asha@example.com",
            "country": "India",
            "state": null,
            "city": "Pune",
            "company_name": company,
            "industry": null,
            "area": null,
            "avg_events_per_year": null,
            "billing_company_name": null,
            "gst_vat_number": null,
            "profile_picture_url": null,
            "id": id
        })
    }

    /// Accept one HTTP/1.1 connection, answer with `status` and `body`, and
    /// hand back the raw request text.
    pub async fn spawn_one_shot_server(status: u16, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test server");
        let addr = listener.local_addr().expect("Failed to read test server address");

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("Failed to accept");
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = socket.read(&mut chunk).await.expect("Failed to read request");
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                if request_complete(&buf) {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {} OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket
                .write_all(response.as_bytes())
                .await
                .expect("Failed to write response");
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&buf).to_string()
        });

        (format!("http://{}", addr), handle)
    }

    fn request_complete(buf: &[u8]) -> bool {
        let text = String::from_utf8_lossy(buf);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                if name.trim().eq_ignore_ascii_case("content-length") {
                    value.trim().parse::<usize>().ok()
                } else {
                    None
                }
            })
            .unwrap_or(0);
        buf.len() >= header_end + 4 + content_length
    }
}
