use tarushiru_core::money::{budget_summary, parse_non_negative_amount};
use tarushiru_core::ViewController;

use super::format_yen;
use crate::opt::BudgetCommand;

pub(crate) fn run(vc: &mut ViewController, cmd: BudgetCommand) -> anyhow::Result<()> {
    match cmd {
        BudgetCommand::Show => {}
        BudgetCommand::Income { amount } => {
            vc.set_monthly_income(parse_non_negative_amount(&amount)?)?;
        }
        BudgetCommand::Variable { amount } => {
            vc.set_variable_budget(parse_non_negative_amount(&amount)?)?;
        }
        BudgetCommand::FixedAdd { name, amount } => {
            vc.add_fixed_cost(&name, parse_non_negative_amount(&amount)?)?;
        }
        BudgetCommand::FixedRemove { id } => {
            vc.remove_fixed_cost(&id)?;
        }
    }
    print_budget(vc);
    Ok(())
}

fn print_budget(vc: &ViewController) {
    let budget = &vc.data().budget_profile;
    let summary = budget_summary(budget);

    println!("Income          {:>14}", format_yen(summary.monthly_income));
    for item in &budget.fixed_costs {
        println!("  {:<14}{:>14}  ({})", item.name, format_yen(item.amount), item.id);
    }
    println!("Fixed costs     {:>14}", format_yen(summary.total_fixed_costs));
    println!("Variable budget {:>14}", format_yen(summary.variable_budget));
    println!("Surplus         {:>14}", format_yen(summary.surplus));
}
