use clap::Args;
use rebate::coupons::CouponCode;
use rebate_app::{
    database::{self, Db},
    domain::rules::{PgRuleStore, RuleStore},
};

#[derive(Debug, Args)]
pub(crate) struct RedeemArgs {
    /// Coupon code; case and surrounding whitespace are ignored
    #[arg(long)]
    code: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: RedeemArgs) -> Result<(), String> {
    let code = CouponCode::parse(&args.code).ok_or_else(|| "code cannot be empty".to_string())?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let redeemed = PgRuleStore::new(Db::new(pool))
        .redeem_coupon(&code)
        .await
        .map_err(|error| format!("failed to redeem coupon: {error}"))?;

    if !redeemed {
        return Err(format!("coupon {code} is unknown or has no uses left"));
    }

    println!("redeemed coupon: {code}");

    Ok(())
}
