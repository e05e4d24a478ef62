//! Gymtastic CLI - the storefront and back-office from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! gym products list --category suplementos
//! gym products show 3
//!
//! # Fill the cart and pay
//! gym cart add 3 --quantity 2
//! gym cart show
//! gym checkout --first-name Pedro --last-names "Hacker" --email pedro@example.com \
//!     --street "Los crisantemos 123" --region "Región Metropolitana de Santiago" \
//!     --commune Cerrillos
//!
//! # Accounts
//! gym register --name Juan --surnames Pérez --email juan@test.com \
//!     --password secreto1 --confirm-password secreto1
//! gym login -e juan@test.com -p secreto1
//! gym orders list
//!
//! # Back-office (admin role)
//! gym admin users list
//! ```
//!
//! # Commands
//!
//! - `products` - Browse the catalog
//! - `cart`, `checkout` - Manage the cart and place an order
//! - `login`, `logout`, `whoami`, `register`, `profile` - Account session
//! - `orders` - Own order history
//! - `admin` - Product, user and order management
//! - `regions` - Region and commune lookup
//!
//! Configuration is read from the environment (see
//! [`gymtastic_storefront::config`]); logs go to stderr, filtered by
//! `RUST_LOG` (default `gymtastic=info`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gymtastic_core::validation::RegistrationForm;
use gymtastic_core::{Category, CustomerDetails, Price, ProductId, Stock};
use gymtastic_storefront::AppError;
use gymtastic_storefront::api::{NewProduct, ProductUpdate, ProfileUpdate};

mod commands;
mod output;

use commands::Context;

#[derive(Parser)]
#[command(name = "gym")]
#[command(author, version, about = "Gymtastic store CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Pay for the cart
    Checkout(CheckoutArgs),
    /// Log in with email and password
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Log out and forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Create an account
    Register(RegisterArgs),
    /// Edit the logged-in user's profile
    Profile {
        #[arg(short, long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
    },
    /// Own order history
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Back-office (requires the admin role)
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Region and commune lookup
    Regions {
        #[command(subcommand)]
        action: RegionAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List products
    List {
        /// Only this category (Membresías, Suplementos, Ropa, Equipamiento)
        #[arg(short, long)]
        category: Option<Category>,
    },
    /// Show one product
    Show { id: ProductId },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show,
    /// Add a product
    Add {
        id: ProductId,
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set a line's quantity (0 removes it)
    Update { id: ProductId, quantity: u32 },
    /// Remove a product
    Remove { id: ProductId },
    /// Empty the cart
    Clear,
}

#[derive(Args)]
struct CheckoutArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_names: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    street: String,
    #[arg(long)]
    apartment: Option<String>,
    #[arg(long)]
    region: String,
    #[arg(long)]
    commune: String,
}

impl From<CheckoutArgs> for CustomerDetails {
    fn from(args: CheckoutArgs) -> Self {
        Self {
            first_name: args.first_name,
            last_names: args.last_names,
            email: args.email,
            street: args.street,
            apartment: args.apartment.filter(|a| !a.trim().is_empty()),
            region: args.region,
            commune: args.commune,
        }
    }
}

#[derive(Args)]
struct RegisterArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    surnames: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    #[arg(long)]
    confirm_password: String,
}

impl From<RegisterArgs> for RegistrationForm {
    fn from(args: RegisterArgs) -> Self {
        Self {
            name: args.name,
            surnames: args.surnames,
            email: args.email,
            password: args.password,
            confirm_password: args.confirm_password,
        }
    }
}

#[derive(Subcommand)]
enum OrderAction {
    /// List your orders
    List,
    /// Show one of your orders
    Show { id: String },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Manage the catalog
    Products {
        #[command(subcommand)]
        action: AdminProductAction,
    },
    /// Manage accounts
    Users {
        #[command(subcommand)]
        action: AdminUserAction,
    },
    /// Review orders
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
}

#[derive(Subcommand)]
enum AdminProductAction {
    /// Add a product
    Create {
        #[arg(short, long)]
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(short, long, default_value = "")]
        image: String,
        /// Price in whole pesos
        #[arg(short, long)]
        price: u32,
        /// Units in stock; omit with --unlimited
        #[arg(short, long, conflicts_with = "unlimited", required_unless_present = "unlimited")]
        stock: Option<u32>,
        #[arg(long)]
        unlimited: bool,
        #[arg(short, long)]
        category: Category,
    },
    /// Edit a product; only the given fields change
    Update {
        id: ProductId,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        image: Option<String>,
        /// Price in whole pesos
        #[arg(short, long)]
        price: Option<u32>,
        #[arg(short, long, conflicts_with = "unlimited")]
        stock: Option<u32>,
        #[arg(long)]
        unlimited: bool,
        #[arg(short, long)]
        category: Option<Category>,
    },
    /// Remove a product
    Delete { id: ProductId },
}

#[derive(Subcommand)]
enum AdminUserAction {
    /// List accounts
    List,
    /// Delete an account by email
    Delete { email: String },
}

#[derive(Subcommand)]
enum RegionAction {
    /// List regions
    List,
    /// List the communes of a region
    Communes { region: String },
}

fn stock_arg(stock: Option<u32>, unlimited: bool) -> Option<Stock> {
    if unlimited {
        Some(Stock::Unlimited)
    } else {
        stock.map(Stock::Limited)
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "Command failed");
        output::line(&e.user_message());
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gymtastic=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let ctx = Context::load()?;

    match cli.command {
        Commands::Products { action } => match action {
            ProductAction::List { category } => commands::catalog::list(&ctx, category).await?,
            ProductAction::Show { id } => commands::catalog::show(&ctx, id).await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&ctx),
            CartAction::Add { id, quantity } => commands::cart::add(&ctx, id, quantity).await?,
            CartAction::Update { id, quantity } => commands::cart::update(&ctx, id, quantity)?,
            CartAction::Remove { id } => commands::cart::remove(&ctx, id)?,
            CartAction::Clear => commands::cart::clear(&ctx),
        },
        Commands::Checkout(args) => commands::cart::checkout(&ctx, &args.into()).await?,
        Commands::Login { email, password } => {
            commands::account::login(&ctx, &email, password).await?;
        }
        Commands::Logout => commands::account::logout(&ctx),
        Commands::Whoami => commands::account::whoami(&ctx)?,
        Commands::Register(args) => commands::account::register(&ctx, args.into()).await?,
        Commands::Profile {
            name,
            phone,
            avatar,
        } => {
            let update = ProfileUpdate {
                name,
                phone,
                avatar_uri: avatar,
            };
            commands::account::update_profile(&ctx, update).await?;
        }
        Commands::Orders { action } => match action {
            OrderAction::List => commands::orders::list(&ctx).await?,
            OrderAction::Show { id } => commands::orders::show(&ctx, &id).await?,
        },
        Commands::Admin { action } => run_admin(&ctx, action).await?,
        Commands::Regions { action } => match action {
            RegionAction::List => commands::catalog::regions(),
            RegionAction::Communes { region } => commands::catalog::communes(&region)?,
        },
    }
    Ok(())
}

async fn run_admin(ctx: &Context, action: AdminAction) -> Result<(), AppError> {
    match action {
        AdminAction::Products { action } => match action {
            AdminProductAction::Create {
                name,
                description,
                image,
                price,
                stock,
                unlimited,
                category,
            } => {
                let product = NewProduct {
                    name,
                    description,
                    image,
                    price: Price::from_pesos(i64::from(price)),
                    stock: stock_arg(stock, unlimited).unwrap_or(Stock::Unlimited),
                    category,
                };
                commands::admin::create_product(ctx, &product).await?;
            }
            AdminProductAction::Update {
                id,
                name,
                description,
                image,
                price,
                stock,
                unlimited,
                category,
            } => {
                let update = ProductUpdate {
                    name,
                    description,
                    image,
                    price: price.map(|pesos| Price::from_pesos(i64::from(pesos))),
                    stock: stock_arg(stock, unlimited),
                    category,
                };
                commands::admin::update_product(ctx, id, &update).await?;
            }
            AdminProductAction::Delete { id } => commands::admin::delete_product(ctx, id).await?,
        },
        AdminAction::Users { action } => match action {
            AdminUserAction::List => commands::admin::list_users(ctx).await?,
            AdminUserAction::Delete { email } => commands::admin::delete_user(ctx, &email).await?,
        },
        AdminAction::Orders { action } => match action {
            OrderAction::List => commands::admin::list_orders(ctx).await?,
            OrderAction::Show { id } => commands::admin::show_order(ctx, &id).await?,
        },
    }
    Ok(())
}
