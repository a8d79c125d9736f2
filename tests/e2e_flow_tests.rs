//! End-to-end flows: dispatch against the mock API, then serialize the
//! response the way the CLI does.

use anyhow::Result;
use serde_json::Value;

use restctl::cli::handle_request;
use restctl::client::{ApiClient, Method};
use restctl::error::RestError;
use restctl::output::write_to_file;
use restctl::test_utils::MockServer;

#[tokio::test]
async fn test_handle_request_saves_to_output_file() -> Result<()> {
    let (_server, url) = MockServer::new().start().await?;
    let client = ApiClient::with_config(url, 5)?;
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("post.json");

    // Full driver path: dispatch, write, success line
    handle_request(&client, Method::Get, "/posts/1", Some(&path), false).await?;

    let saved: Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(saved["id"], 1);
    assert_eq!(saved["userId"], 1);
    assert_eq!(saved["title"], "first post");

    Ok(())
}

#[tokio::test]
async fn test_handle_request_prints_without_output_file() -> Result<()> {
    let (_server, url) = MockServer::new().start().await?;
    let client = ApiClient::with_config(url, 5)?;

    // No output path: the response goes to stdout as indented JSON
    // (rendering is covered by the render_response unit test)
    handle_request(&client, Method::Get, "/posts/1", None, false).await?;

    Ok(())
}

#[tokio::test]
async fn test_handle_request_propagates_dispatch_failure() -> Result<()> {
    let (_server, url) = MockServer::new().start().await?;
    let client = ApiClient::with_config(url, 5)?;
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("post.json");

    let result = handle_request(&client, Method::Get, "/posts/999", Some(&path), false).await;

    // Dispatch failed, so no output step runs and no file appears
    assert!(result.is_err());
    assert!(!path.exists());

    Ok(())
}

#[tokio::test]
async fn test_get_and_save_json() -> Result<()> {
    let (_server, url) = MockServer::new().start().await?;
    let client = ApiClient::with_config(url, 5)?;
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("post.json");

    let post = client.dispatch(Method::Get, "/posts/1", None).await?;
    write_to_file(&post, &path)?;

    let saved: Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(saved, post);

    Ok(())
}

#[tokio::test]
async fn test_get_collection_and_save_csv() -> Result<()> {
    let (_server, url) = MockServer::new().start().await?;
    let client = ApiClient::with_config(url, 5)?;
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("posts.csv");

    let posts = client.dispatch(Method::Get, "/posts", None).await?;
    write_to_file(&posts, &path)?;

    let content = std::fs::read_to_string(&path)?;
    let lines: Vec<&str> = content.lines().collect();

    // Header from the first record's keys, one row per record
    assert_eq!(lines[0], "userId,id,title,body");
    assert_eq!(lines.len(), 1 + posts.as_array().unwrap().len());
    assert!(lines[1].contains("first post"));

    Ok(())
}

#[tokio::test]
async fn test_single_object_cannot_be_saved_as_csv() -> Result<()> {
    let (_server, url) = MockServer::new().start().await?;
    let client = ApiClient::with_config(url, 5)?;
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("post.csv");

    let post = client.dispatch(Method::Get, "/posts/1", None).await?;
    let err = write_to_file(&post, &path).unwrap_err();

    assert!(matches!(err, RestError::UnsupportedShape(_)));
    assert!(!path.exists());

    Ok(())
}

#[tokio::test]
async fn test_unsupported_extension_is_rejected() -> Result<()> {
    let (_server, url) = MockServer::new().start().await?;
    let client = ApiClient::with_config(url, 5)?;
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("post.txt");

    let post = client.dispatch(Method::Get, "/posts/1", None).await?;
    let err = write_to_file(&post, &path).unwrap_err();

    assert!(matches!(err, RestError::UnsupportedFormat(_)));
    assert!(!path.exists());

    Ok(())
}
