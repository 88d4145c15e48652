//! Basic substitution tests

use super::helpers::{RecordingWriter, prompt_dir};
use super::*;

#[test]
fn test_render_without_directives_is_identity() {
    let temp = prompt_dir(&[]);
    let template = "You are a Filecoin analyst.\n{{ not an include }}\n";
    let result = render(template, temp.path()).unwrap();
    assert_eq!(result, template);
}

#[test]
fn test_render_intro_section_end() {
    let temp = prompt_dir(&[("parts/a.txt", "  Section A content  ")]);
    let result = render("Intro.\n{{include:parts/a.txt}}\nEnd.", temp.path()).unwrap();
    assert_eq!(result, "Intro.\nSection A content\n\nEnd.");
}

#[test]
fn test_render_trims_directive_path() {
    let temp = prompt_dir(&[("tools.md", "\n\nTool list\n\n")]);
    let result = render("{{include:   tools.md \t}}", temp.path()).unwrap();
    assert_eq!(result, "Tool list\n");
}

#[test]
fn test_render_repeated_directive_resolved_each_time() {
    let temp = prompt_dir(&[("a.md", "AAA"), ("b.md", "BBB")]);
    let template = "{{include:a.md}}-{{include:b.md}}-{{include:a.md}}";
    let result = render(template, temp.path()).unwrap();
    assert_eq!(result, "AAA\n-BBB\n-AAA\n");
}

#[test]
fn test_render_is_idempotent() {
    let temp = prompt_dir(&[
        ("system_prompt.md", "Head\n{{include:parts/one.txt}}Tail"),
        ("parts/one.txt", "one"),
    ]);
    let path = temp.path().join("system_prompt.md");
    let first = render_file(&path).unwrap();
    let second = render_file(&path).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, "Head\none\nTail");
}

#[test]
fn test_render_file_resolves_relative_to_template_dir() {
    let temp = prompt_dir(&[
        ("prompts/system_prompt.md", "{{include:shared/rules.md}}"),
        ("prompts/shared/rules.md", "Be precise."),
        ("shared/rules.md", "WRONG DIRECTORY"),
    ]);
    let result = render_file(&temp.path().join("prompts/system_prompt.md")).unwrap();
    assert_eq!(result, "Be precise.\n");
}

#[test]
fn test_render_allows_parent_directory_includes() {
    let temp = prompt_dir(&[
        ("prompts/system_prompt.md", "{{include:../common/footer.md}}"),
        ("common/footer.md", "footer"),
    ]);
    let result = render_file(&temp.path().join("prompts/system_prompt.md")).unwrap();
    assert_eq!(result, "footer\n");
}

#[test]
fn test_existing_txt_is_used_without_write_back() {
    let temp = prompt_dir(&[("a.txt", "from txt"), ("a.md", "from md")]);
    let writer = RecordingWriter::default();
    let result = IncludeResolver::new(&writer)
        .render("{{include:a.txt}}", temp.path())
        .unwrap();
    assert_eq!(result, "from txt\n");
    assert!(writer.writes.lock().unwrap().is_empty());
}

#[test]
fn test_non_include_braces_in_included_content_pass_through() {
    let temp = prompt_dir(&[("a.md", "uses {{placeholder}} syntax")]);
    let result = render("{{include:a.md}}", temp.path()).unwrap();
    assert_eq!(result, "uses {{placeholder}} syntax\n");
}
