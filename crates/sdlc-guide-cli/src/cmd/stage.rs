use crate::output::print_json;
use sdlc_guide_core::catalog::Stage;
use std::path::Path;

pub fn run(root: &Path, key: &str, prompt: Option<usize>, json: bool) -> anyhow::Result<()> {
    let (_, catalog) = super::load_project(root)?;
    let stage = catalog.lookup(key)?;

    match prompt {
        Some(index) => show_prompt(stage, index, json),
        None if json => print_json(stage),
        None => {
            print_stage(stage);
            Ok(())
        }
    }
}

fn show_prompt(stage: &Stage, index: usize, json: bool) -> anyhow::Result<()> {
    let text = stage.prompt(index)?;
    if json {
        return print_json(&serde_json::json!({
            "stage": stage.key,
            "index": index,
            "count": stage.prompts.len(),
            "prompt": text,
        }));
    }
    println!("{text}");
    Ok(())
}

fn print_stage(stage: &Stage) {
    println!("{} ({})", stage.display_title(), stage.key);
    if !stage.description.is_empty() {
        println!("{}", stage.description);
    }

    println!();
    println!("Prompt templates:");
    for (i, prompt) in stage.prompts.iter().enumerate() {
        println!("  [{i}]");
        for line in prompt.lines() {
            println!("    {line}");
        }
    }

    if !stage.best_practices.is_empty() {
        println!();
        println!("Best practices:");
        for practice in &stage.best_practices {
            println!("  - {practice}");
        }
    }

    if let Some(framework) = &stage.framework {
        println!();
        println!("Framework:");
        for (n, (name, text)) in framework.steps().into_iter().enumerate() {
            let Some(text) = text else { continue };
            println!("  {}. {}", n + 1, name.to_uppercase());
            for line in text.lines() {
                println!("     {line}");
            }
        }
    }
}
