use anyhow::anyhow;

use tarushiru_core::money::{month_overview, parse_amount, trend_series, PeriodDelta};
use tarushiru_core::ViewController;

use super::{confirm, format_yen, month_or_current};
use crate::config::Config;
use crate::main_lib::annotation_service;
use crate::opt::{CategoryCommand, MoneyCommand};

pub(crate) async fn run(
    vc: &mut ViewController,
    config: &Config,
    cmd: MoneyCommand,
) -> anyhow::Result<()> {
    match cmd {
        MoneyCommand::Show { month } => {
            let month = month_or_current(month.as_deref())?;
            let data = vc.data();
            let overview = month_overview(&data.assets, &data.money_config, &month);

            println!("{}  total {}", overview.month, format_yen(overview.total));
            if !overview.has_record {
                println!("  (no record for this month)");
            }
            print_delta("vs last month", overview.month_over_month.as_ref());
            print_delta("vs last year ", overview.year_over_year.as_ref());
            for share in &overview.breakdown {
                println!(
                    "  {:<12} {:>14} {:>6.1}%",
                    share.category,
                    format_yen(share.value),
                    share.share * 100.0
                );
            }
            Ok(())
        }
        MoneyCommand::Set {
            category,
            amount,
            month,
        } => {
            let month = month_or_current(month.as_deref())?;
            let amount = parse_amount(&amount)?;
            vc.set_asset_value(&month, &category, amount)?;
            println!("{} {} = {}", month, category, format_yen(amount));
            Ok(())
        }
        MoneyCommand::Category(CategoryCommand::Add { name }) => {
            vc.add_asset_category(&name)?;
            println!(
                "Categories: {}",
                vc.data().money_config.asset_categories.join(", ")
            );
            Ok(())
        }
        MoneyCommand::Category(CategoryCommand::Remove { name, confirm: c }) => {
            if !vc.data().money_config.asset_categories.contains(&name) {
                return Err(anyhow!("Unknown category '{}'", name));
            }
            if !confirm(&format!("Remove category '{}'?", name), c.yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            vc.remove_asset_category(&name)?;
            println!("Removed category '{}'", name);
            Ok(())
        }
        MoneyCommand::Trend => {
            let series = trend_series(&vc.data().assets);
            if series.is_empty() {
                println!("No asset records yet.");
            }
            for point in series {
                println!("{}  {:>14}", point.month, format_yen(point.total));
            }
            Ok(())
        }
        MoneyCommand::Analyze => {
            let service = annotation_service(config);
            let data = vc.data();
            let report = service
                .analyze_assets(&data.assets, &data.budget_profile)
                .await
                .map_err(|e| anyhow!("Asset analysis failed: {}", e))?;
            println!("{}", report);
            Ok(())
        }
    }
}

fn print_delta(label: &str, delta: Option<&PeriodDelta>) {
    match delta {
        Some(d) => {
            let sign = if d.delta >= 0 { "+" } else { "" };
            println!(
                "  {} ({}): {}{}",
                label,
                d.baseline_month,
                sign,
                format_yen(d.delta)
            );
        }
        None => println!("  {}: n/a", label),
    }
}
