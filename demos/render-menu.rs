use menu_render::settings::Settings;
use menu_render::{MenuRenderer, TextBlock, WeekMenu, Weekday};

fn main() {
    let mut args = std::env::args().skip(1);
    let settings_path = args.next().unwrap_or_else(|| "demos/menu.toml".to_string());
    let output_path = args.next().unwrap_or_else(|| "out/menu.png".to_string());

    let settings = Settings::load(&settings_path).expect("can load settings");

    let menu = WeekMenu::new()
        .with_date_range("15.12–19.12")
        .with_dishes(
            Weekday::Monday,
            vec![
                TextBlock::new("Борщ", "говядина, свёкла, капуста, сметана"),
                TextBlock::new("Котлета с пюре", "свиной фарш, картофель, сливочное масло"),
                TextBlock::new("Компот", "сухофрукты"),
            ],
        )
        .with_dishes(
            Weekday::Tuesday,
            vec![TextBlock::new("Плов", "рис, курица, морковь, зира")],
        )
        .with_unavailable(Weekday::Wednesday, Some("12.01.26".to_string()))
        .with_dishes(
            Weekday::Thursday,
            vec![
                TextBlock::new("Суп лапша", "куриный бульон, домашняя лапша, зелень"),
                TextBlock::new("Гречка по-купечески", "гречка, свинина, лук, морковь"),
                TextBlock::new("Салат витаминный", "капуста, морковь, яблоко, масло"),
                TextBlock::new("Морс", "клюква"),
            ],
        )
        .with_unavailable(Weekday::Friday, None);

    let output = MenuRenderer::new(settings)
        .render(&menu)
        .expect("can render menu");

    for report in &output.zones {
        println!("{}: {:?}", report.zone, report.outcome);
    }
    for problem in output.problems() {
        eprintln!("check {}: {:?}", problem.zone, problem.outcome);
    }

    output.save(&output_path).expect("can save image");
    println!("saved {output_path}");
}
