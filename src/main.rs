use std::env;

use recipe_import::import_recipe;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let url = args.get(1).ok_or("Please provide a URL as an argument")?;
    let user_instructions = args.get(2).map(String::as_str);

    let recipe = import_recipe(url, user_instructions, None).await?;
    println!("{}", serde_json::to_string_pretty(&recipe)?);

    Ok(())
}
