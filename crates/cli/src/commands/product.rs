//! Catalog administration: the only way products are created, edited, or removed.

use clap::{Args, Subcommand};
use pricecheck_core::{Barcode, Product};
use pricecheck_db::{ProductRepository, RepositoryError, SqlProductRepository};
use rust_decimal::Decimal;
use serde_json::json;

use crate::commands::{
    with_catalog_pool, CommandResult, Failure, EXIT_CONFLICT, EXIT_INVALID_INPUT, EXIT_NOT_FOUND,
    EXIT_PERSISTENCE,
};

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    #[command(about = "Create a product; fails if the barcode is already registered")]
    Add(AddArgs),
    #[command(about = "Edit fields of an existing product")]
    Update(UpdateArgs),
    #[command(about = "Delete a product by barcode")]
    Remove(BarcodeArgs),
    #[command(about = "Show one product by barcode")]
    Show(BarcodeArgs),
    #[command(about = "List products, optionally filtered by a name or barcode fragment")]
    List(ListArgs),
}

#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub barcode: String,
    #[arg(long)]
    pub name: String,
    #[arg(long, allow_negative_numbers = true)]
    pub price: Decimal,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct UpdateArgs {
    #[arg(long)]
    pub barcode: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    pub price: Option<Decimal>,
    #[arg(long, conflicts_with = "clear_description")]
    pub description: Option<String>,
    #[arg(long, help = "Remove the stored description")]
    pub clear_description: bool,
}

#[derive(Debug, Clone, Args)]
pub struct BarcodeArgs {
    #[arg(long)]
    pub barcode: String,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    #[arg(long, help = "Case-insensitive fragment of the name or barcode")]
    pub search: Option<String>,
}

pub fn run(command: ProductCommand) -> CommandResult {
    match command {
        ProductCommand::Add(args) => add(args),
        ProductCommand::Update(args) => update(args),
        ProductCommand::Remove(args) => remove(args),
        ProductCommand::Show(args) => show(args),
        ProductCommand::List(args) => list(args),
    }
}

pub fn add(args: AddArgs) -> CommandResult {
    const COMMAND: &str = "product.add";

    let product = match Product::new(args.barcode, args.name, args.price, args.description) {
        Ok(product) => product,
        Err(error) => {
            return CommandResult::failure(
                COMMAND,
                "invalid_input",
                error.to_string(),
                EXIT_INVALID_INPUT,
            );
        }
    };

    let result = with_catalog_pool(COMMAND, |pool| async move {
        let repo = SqlProductRepository::new(pool);
        repo.insert(product.clone()).await.map_err(|error| match error {
            RepositoryError::Duplicate { .. } => ("conflict", error.to_string(), EXIT_CONFLICT),
            other => persistence(other),
        })?;
        Ok::<_, Failure>(product)
    });

    match result {
        Ok(product) => {
            product_result(COMMAND, format!("created product `{}`", product.barcode), &product)
        }
        Err(failure) => failure,
    }
}

pub fn update(args: UpdateArgs) -> CommandResult {
    const COMMAND: &str = "product.update";

    let nothing_to_change = args.name.is_none()
        && args.price.is_none()
        && args.description.is_none()
        && !args.clear_description;
    if nothing_to_change {
        return CommandResult::failure(
            COMMAND,
            "invalid_input",
            "nothing to update: pass --name, --price, --description, or --clear-description",
            EXIT_INVALID_INPUT,
        );
    }

    let result = with_catalog_pool(COMMAND, |pool| async move {
        let repo = SqlProductRepository::new(pool);
        let barcode = Barcode(args.barcode);
        let mut product = repo
            .find_by_barcode(&barcode)
            .await
            .map_err(persistence)?
            .ok_or_else(|| not_found(&barcode))?;

        if let Some(name) = args.name {
            product.name = name;
        }
        if let Some(price) = args.price {
            product.price = price;
        }
        if args.clear_description {
            product.description = None;
        } else if let Some(description) = args.description {
            product.description = Some(description);
        }
        product
            .validate()
            .map_err(|error| ("invalid_input", error.to_string(), EXIT_INVALID_INPUT))?;

        repo.save(product.clone()).await.map_err(persistence)?;
        Ok::<_, Failure>(product)
    });

    match result {
        Ok(product) => {
            product_result(COMMAND, format!("updated product `{}`", product.barcode), &product)
        }
        Err(failure) => failure,
    }
}

pub fn remove(args: BarcodeArgs) -> CommandResult {
    const COMMAND: &str = "product.remove";

    let result = with_catalog_pool(COMMAND, |pool| async move {
        let repo = SqlProductRepository::new(pool);
        let barcode = Barcode(args.barcode);
        if !repo.delete(&barcode).await.map_err(persistence)? {
            return Err(not_found(&barcode));
        }
        Ok::<_, Failure>(barcode)
    });

    match result {
        Ok(barcode) => CommandResult::success(COMMAND, format!("removed product `{barcode}`")),
        Err(failure) => failure,
    }
}

pub fn show(args: BarcodeArgs) -> CommandResult {
    const COMMAND: &str = "product.show";

    let result = with_catalog_pool(COMMAND, |pool| async move {
        let repo = SqlProductRepository::new(pool);
        let barcode = Barcode(args.barcode);
        repo.find_by_barcode(&barcode)
            .await
            .map_err(persistence)?
            .ok_or_else(|| not_found(&barcode))
    });

    match result {
        Ok(product) => product_result(COMMAND, format!("product `{}`", product.barcode), &product),
        Err(failure) => failure,
    }
}

pub fn list(args: ListArgs) -> CommandResult {
    const COMMAND: &str = "product.list";

    let result = with_catalog_pool(COMMAND, |pool| async move {
        let repo = SqlProductRepository::new(pool);
        repo.search(args.search.as_deref()).await.map_err(persistence)
    });

    match result {
        Ok(products) => {
            let message = match products.len() {
                1 => "1 product".to_string(),
                count => format!("{count} products"),
            };
            CommandResult::success_with_data(COMMAND, message, json!(products))
        }
        Err(failure) => failure,
    }
}

fn product_result(command: &str, message: String, product: &Product) -> CommandResult {
    CommandResult::success_with_data(command, message, json!(product))
}

fn persistence(error: RepositoryError) -> Failure {
    ("persistence", error.to_string(), EXIT_PERSISTENCE)
}

fn not_found(barcode: &Barcode) -> Failure {
    ("not_found", format!("no product with barcode `{barcode}`"), EXIT_NOT_FOUND)
}
