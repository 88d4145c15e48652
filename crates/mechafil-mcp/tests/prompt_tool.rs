//! get_system_prompt rendering, fallback and error codes

use mechafil_core::config::Config;
use mechafil_mcp::context::McpContext;
use mechafil_mcp::errors;
use mechafil_mcp::handlers::prompt::PromptTool;
use mechafil_mcp::server::MechafilServer;
use mechafil_testkit::PromptFixture;
use mockito::Server;

fn offline_server(fixture: &PromptFixture) -> MechafilServer {
    let mut config = Config::default();
    config.prompt.template = fixture.template_path();
    MechafilServer::new(McpContext::new(config), true)
}

fn result_text(result: &rmcp::model::CallToolResult) -> String {
    result.content[0].as_text().unwrap().text.clone()
}

#[tokio::test]
async fn test_renders_includes() {
    let fixture = PromptFixture::new(
        "Intro.\n{{include:parts/a.txt}}\nEnd.",
        &[("parts/a.txt", "  Section A content  ")],
    );
    let server = offline_server(&fixture);

    let result = PromptTool::get_system_prompt(&server).await.unwrap();

    assert_eq!(result_text(&result), "Intro.\nSection A content\n\nEnd.");
}

#[tokio::test]
async fn test_fallback_is_written_back() {
    let fixture = PromptFixture::new("{{include:parts/x.txt}}", &[("parts/x.md", "from md")]);
    let server = offline_server(&fixture);

    let first = PromptTool::get_system_prompt(&server).await.unwrap();
    assert_eq!(result_text(&first), "from md\n");

    let written = fixture.prompts_dir().join("parts/x.txt");
    assert_eq!(std::fs::read_to_string(&written).unwrap(), "from md");

    std::fs::remove_file(fixture.prompts_dir().join("parts/x.md")).unwrap();
    let second = PromptTool::get_system_prompt(&server).await.unwrap();
    assert_eq!(result_text(&second), "from md\n");
}

#[tokio::test]
async fn test_write_back_can_be_disabled() {
    let fixture = PromptFixture::new("{{include:parts/x.txt}}", &[("parts/x.md", "from md")]);
    let mut config = Config::default();
    config.prompt.template = fixture.template_path();
    config.prompt.write_back = false;
    let server = MechafilServer::new(McpContext::new(config), true);

    PromptTool::get_system_prompt(&server).await.unwrap();

    assert!(!fixture.prompts_dir().join("parts/x.txt").exists());
}

#[tokio::test]
async fn test_failures_have_distinct_codes() {
    let missing = PromptFixture::new("{{include:parts/y.txt}}", &[]);
    let err = PromptTool::get_system_prompt(&offline_server(&missing))
        .await
        .unwrap_err();
    assert_eq!(errors::code_of(&err), Some(errors::INCLUDE_NOT_FOUND));
    let details = &err.data.as_ref().unwrap()["details"];
    assert_eq!(details["requested"], "parts/y.txt");
    assert!(details["fallback"].as_str().unwrap().ends_with("y.md"));

    let nested = PromptFixture::new(
        "{{include:parts/a.txt}}",
        &[("parts/a.txt", "see {{include:z}}")],
    );
    let err = PromptTool::get_system_prompt(&offline_server(&nested))
        .await
        .unwrap_err();
    assert_eq!(errors::code_of(&err), Some(errors::INCOMPLETE_RENDER));

    let no_template = PromptFixture::new("unused", &[]);
    std::fs::remove_file(no_template.template_path()).unwrap();
    let err = PromptTool::get_system_prompt(&offline_server(&no_template))
        .await
        .unwrap_err();
    assert_eq!(errors::code_of(&err), Some(errors::TEMPLATE_NOT_FOUND));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_online_render_wakes_upstream_first() {
    let mut upstream = Server::new_async().await;
    let wake = upstream
        .mock("GET", "/health")
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let fixture = PromptFixture::new("Hello", &[]);
    let mut config = Config::default();
    config.upstream.url = upstream.url();
    config.prompt.template = fixture.template_path();
    let server = MechafilServer::new(McpContext::new(config), false);

    let result = PromptTool::get_system_prompt(&server).await.unwrap();

    wake.assert_async().await;
    assert_eq!(result_text(&result), "Hello");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_wake_does_not_affect_render() {
    let fixture = PromptFixture::new("Hello", &[]);
    let mut config = Config::default();
    config.upstream.url = "http://127.0.0.1:1".to_string();
    config.prompt.template = fixture.template_path();
    let server = MechafilServer::new(McpContext::new(config), false);

    let result = PromptTool::get_system_prompt(&server).await.unwrap();

    assert_eq!(result_text(&result), "Hello");
}
