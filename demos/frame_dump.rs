//! Frame dump: Render a small dashboard into a buffer and print it.
//!
//! Non-interactive rendering: no raw mode, no input, just the ANSI
//! serialization of one frame followed by the diff to a second frame.
//!
//! Run with `cargo run --example frame_dump`.

use tessera::{
    Buffer, Color, Constraint, Flex, FrameBuffers, Layout, LayoutCache, Modifiers, Rect, Rgb,
    Style, Widget,
};

const WIDTH: u16 = 60;
const HEIGHT: u16 = 12;

/// A titled panel with a filled background.
struct Panel<'a> {
    title: &'a str,
    body: &'a [&'a str],
    bg: Color,
}

impl Widget for Panel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::new().bg(self.bg));
        buf.set_stringn(
            area.x,
            area.y,
            self.title,
            usize::from(area.width),
            Style::new().add_modifier(Modifiers::BOLD | Modifiers::UNDERLINE),
        );
        for (y, line) in (area.y + 1..area.bottom()).zip(self.body) {
            buf.set_stringn(area.x + 1, y, line, usize::from(area.width.saturating_sub(1)), Style::new());
        }
    }
}

fn draw(frames: &mut FrameBuffers, cache: &mut LayoutCache, tick: u32) {
    let area = frames.area();
    let rows = Layout::vertical()
        .constraints([Constraint::Length(1), Constraint::Fill(1), Constraint::Length(1)]);
    let split = cache.split(&rows, area);
    let (header, body, footer) = (split[0], split[1], split[2]);
    let [left, right] = Layout::horizontal()
        .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(2, 3)])
        .spacing(1)
        .margin(1)
        .areas(body);

    frames.render_widget(
        |area: Rect, buf: &mut Buffer| {
            let [title, clock] = Layout::horizontal()
                .constraints([Constraint::Length(16), Constraint::Length(9)])
                .flex(Flex::SpaceBetween)
                .areas(area);
            let accent = Style::new().fg(Color::Rgb(Rgb::from_u32(0xFF_AA_33)));
            buf.set_string(title.x, title.y, "tessera 日本語", accent.bold());
            buf.set_string(clock.x, clock.y, format!("tick {tick:>4}"), accent);
        },
        header,
    );
    frames.render_widget(
        Panel {
            title: "Regions",
            body: &["header", "body 🇯🇵", "footer"],
            bg: Color::Indexed(236),
        },
        left,
    );
    frames.render_widget(
        Panel {
            title: "Flags & emoji",
            body: &["👨\u{200d}👩\u{200d}👧 family", "cafe\u{301} combining", "🇺🇸🇯🇵 flags"],
            bg: Color::Indexed(238),
        },
        right,
    );
    frames.render_widget(
        format!("{WIDTH}x{HEIGHT} | left {} cols | right {} cols", left.width, right.width).as_str(),
        footer,
    );
}

fn main() {
    println!("Tessera Frame Dump");
    println!("==================");
    println!();

    let mut frames = FrameBuffers::new(Rect::new(0, 0, WIDTH, HEIGHT));
    let mut cache = LayoutCache::new();

    draw(&mut frames, &mut cache, 1);
    println!("{}", frames.current().to_ansi_string_trimmed());
    println!();
    println!("first frame: {} cell updates", frames.diff().len());
    frames.swap();

    draw(&mut frames, &mut cache, 2);
    let updates = frames.diff();
    println!("second frame: {} cell updates", updates.len());
    for update in &updates {
        println!("  ({:>2}, {:>2}) {:?}", update.x, update.y, update.cell.symbol());
    }

    let stats = cache.stats();
    println!(
        "layout cache: {} hits, {} misses, {} entries",
        stats.hits, stats.misses, stats.entries
    );
}
