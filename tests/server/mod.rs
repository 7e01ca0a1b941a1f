use actix_web::{App, HttpResponse, HttpServer, web};
use std::time::Duration;

/// Wraps body markup in a minimal HTML document
pub fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>{}</title></head><body>{}</body></html>",
        title, body
    )
}

/// A page that triggers none of the SEO rules
#[allow(dead_code)]
pub fn optimized_page() -> String {
    let images: String = (0..10)
        .map(|i| format!(r#"<img src="/img{}.png" alt="Image {}">"#, i, i))
        .collect();
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<title>{}</title>
<meta name="description" content="{}">
<meta name="viewport" content="width=device-width, initial-scale=1">
<link rel="canonical" href="/good">
<script type="application/ld+json">{{"@context": "https://schema.org", "@type": "WebPage"}}</script>
</head>
<body>
<h1>Welcome</h1>
{}
<p>{}</p>
</body>
</html>"#,
        "t".repeat(45),
        "d".repeat(155),
        images,
        "word ".repeat(500)
    )
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

/// Starts the fixture site on an ephemeral port and returns its base URL
/// (`http://127.0.0.1:<port>`, without a trailing slash).
///
/// `/external` links to `other_site`, which should be a different server.
///
/// Depth-first layout of the internal pages:
///
/// ```text
/// /        -> /a, /b, /missing (404), #top, mailto:, /a#frag
/// /a       -> /a1, /b
/// /a1      -> /a2
/// /a2      -> (none)
/// /b       -> /
/// ```
pub async fn spawn_site(other_site: Option<String>) -> String {
    let other_site = other_site.unwrap_or_default();

    let http_server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(other_site.clone()))
            .route(
                "/",
                web::get().to(|| async {
                    html(page(
                        "Home",
                        r##"<a href="/a">A</a>
                            <a href="/b">B</a>
                            <a href="/missing">Missing</a>
                            <a href="#top">Top</a>
                            <a href="mailto:someone@example.com">Mail</a>
                            <a href="/a#frag">A again</a>"##,
                    ))
                }),
            )
            .route(
                "/a",
                web::get().to(|| async {
                    html(page("A", r#"<a href="/a1">A1</a><a href="b">B</a>"#))
                }),
            )
            .route(
                "/a1",
                web::get().to(|| async { html(page("A1", r#"<a href="/a2">A2</a>"#)) }),
            )
            .route(
                "/a2",
                web::get().to(|| async { html(page("A2", "<p>Leaf</p>")) }),
            )
            .route(
                "/b",
                web::get().to(|| async { html(page("B", r#"<a href="/">Home</a>"#)) }),
            )
            .route(
                "/missing",
                web::get().to(|| async { HttpResponse::NotFound().body("Not Found") }),
            )
            .route(
                "/external",
                web::get().to(|other: web::Data<String>| async move {
                    html(page(
                        "External",
                        &format!(
                            r#"<a href="{0}/">Other home</a><a href="{0}/a">Other A</a>"#,
                            other.get_ref()
                        ),
                    ))
                }),
            )
            .route("/good", web::get().to(|| async { html(optimized_page()) }))
            .route(
                "/bare",
                web::get().to(|| async { html("<html><body></body></html>".to_string()) }),
            )
            .route(
                "/slow",
                web::get().to(|| async {
                    tokio::time::sleep(Duration::from_secs(3)).await;
                    html(page("Slow", "<p>Too late</p>"))
                }),
            )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("Failed to bind test server");

    let addr = http_server
        .addrs()
        .first()
        .cloned()
        .expect("No address bound");
    let url = format!("http://{}", addr);

    let app_server = http_server.run();

    tokio::spawn(async move {
        if let Err(e) = app_server.await {
            eprintln!("Test server error: {}", e);
        }
    });

    url
}

pub async fn get_test_server_url() -> String {
    spawn_site(None).await
}
