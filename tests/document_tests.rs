mod common;

use anyhow::Result;
use codedoc::commands::{generate, scan};
use codedoc::error::ConfigurationError;
use common::TestWorkspace;
use serial_test::serial;

#[test]
#[serial]
fn test_end_to_end_document() -> Result<()> {
    let ws = TestWorkspace::new()?;
    let r1 = ws.repo("r1")?;
    let r2 = ws.repo("r2")?;
    let a = ws.write(&r1, "a.js", "const a = 1;\n")?;
    let b = ws.write(&r2, "b.css", "b { color: red; }\n")?;
    ws.write(&r2, "c.js", "const hidden = true;\n")?;
    ws.init_store(&[(&r1, true), (&r2, true)])?;

    scan::execute(&ws.ctx)?;
    ws.set_included(&a, true)?;
    ws.set_included(&b, true)?;

    let stats = generate::execute(&ws.ctx, false)?;

    assert_eq!(stats.entries, 2);
    assert_eq!(stats.unreadable, 0);
    let expected = "——>>> FOLDER : ../r1 <<<——\n\
                    ——>>> users code <<<——\n\
                    const a = 1;\n\
                    \n\n\n\n\n\
                    ——>>> FOLDER : ../r2 <<<——\n\
                    ——>>> users code <<<——\n\
                    b { color: red; }\n\
                    \n\n\n\n\n";
    assert_eq!(ws.document()?, expected);
    Ok(())
}

#[test]
#[serial]
fn test_unreadable_file_does_not_stop_the_batch() -> Result<()> {
    let ws = TestWorkspace::new()?;
    let repo = ws.repo("app")?;
    let first = ws.write(&repo, "1.js", "first body;")?;
    let second = ws.write(&repo, "2.js", "second body;")?;
    let third = ws.write(&repo, "3.js", "third body;")?;
    ws.init_store(&[(&repo, true)])?;

    scan::execute(&ws.ctx)?;
    for file in [&first, &second, &third] {
        ws.set_included(file, true)?;
    }
    std::fs::remove_file(&second)?;

    let stats = generate::execute(&ws.ctx, false)?;

    assert_eq!(stats.entries, 3);
    assert_eq!(stats.unreadable, 1);
    let document = ws.document()?;
    assert_eq!(document.matches("——>>> users code <<<——").count(), 3);
    assert_eq!(document.matches("[Error reading file: ").count(), 1);
    assert!(!document.contains("second body;"));

    let first_at = document.find("first body;").unwrap();
    let error_at = document.find("[Error reading file: ").unwrap();
    let third_at = document.find("third body;").unwrap();
    assert!(first_at < error_at && error_at < third_at);
    Ok(())
}

#[test]
#[serial]
fn test_nested_repository_uses_innermost_label() -> Result<()> {
    let ws = TestWorkspace::new()?;
    let outer = ws.repo("outer")?;
    let inner = ws.repo("outer/packages/inner")?;
    let file = ws.write(&inner, "src/widget.js", "widget body;")?;
    ws.init_store(&[(&outer, false), (&inner, true)])?;

    scan::execute(&ws.ctx)?;
    ws.set_included(&file, true)?;
    generate::execute(&ws.ctx, false)?;

    let document = ws.document()?;
    assert!(document.starts_with("——>>> FOLDER : ../inner/src <<<——\n"));
    Ok(())
}

#[test]
#[serial]
fn test_files_below_header_depth_get_no_header() -> Result<()> {
    let ws = TestWorkspace::new()?;
    let repo = ws.repo("app")?;
    let shallow = ws.write(&repo, "a/top.js", "top body;")?;
    let deep = ws.write(&repo, "a/b/c/d/e/deep.js", "deep body;")?;
    ws.init_store(&[(&repo, true)])?;

    scan::execute(&ws.ctx)?;
    ws.set_included(&shallow, true)?;
    ws.set_included(&deep, true)?;
    let stats = generate::execute(&ws.ctx, false)?;

    assert_eq!(stats.entries, 2);
    assert_eq!(stats.headers, 1);
    assert_eq!(ws.document()?.matches("——>>> FOLDER : ").count(), 1);
    Ok(())
}

#[test]
#[serial]
fn test_nothing_selected_writes_empty_document() -> Result<()> {
    let ws = TestWorkspace::new()?;
    let repo = ws.repo("app")?;
    ws.write(&repo, "a.js", "a")?;
    ws.init_store(&[(&repo, true)])?;

    scan::execute(&ws.ctx)?;
    let stats = generate::execute(&ws.ctx, false)?;

    assert_eq!(stats.entries, 0);
    assert_eq!(ws.document()?, "");
    Ok(())
}

#[test]
#[serial]
fn test_generate_requires_selection_table() -> Result<()> {
    let ws = TestWorkspace::new()?;
    let repo = ws.repo("app")?;
    std::fs::write(
        &ws.ctx.store_path,
        format!(
            "[[CodeFolders]]\nFolder = \"{}\"\nWantScan = true\n",
            repo.display()
        ),
    )?;

    let err = generate::execute(&ws.ctx, false).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ConfigurationError>(),
        Some(ConfigurationError::MissingTable { table: "CODE", .. })
    ));
    assert!(!ws.ctx.output_path.exists());
    Ok(())
}
