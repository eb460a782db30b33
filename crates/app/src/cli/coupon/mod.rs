use clap::{Args, Subcommand};

mod redeem;

#[derive(Debug, Args)]
pub(crate) struct CouponCommand {
    #[command(subcommand)]
    command: CouponSubcommand,
}

#[derive(Debug, Subcommand)]
enum CouponSubcommand {
    /// Record one use of a coupon, respecting its usage cap
    Redeem(redeem::RedeemArgs),
}

pub(crate) async fn run(command: CouponCommand) -> Result<(), String> {
    match command.command {
        CouponSubcommand::Redeem(args) => redeem::run(args).await,
    }
}
