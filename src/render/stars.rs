use super::renderer::Render;
use crate::Chips;
use crate::cards::Card;
use crate::hand::*;
use std::fmt::Write;

/// PokerStars-style text, the lingua franca of hand history tools.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stars;

impl Render for Stars {
    fn render(&self, hand: &HandAccumulator) -> anyhow::Result<String> {
        let ref mut out = String::new();
        let currency = hand.game().currency;
        let variant = hand.game().variant();
        let seated = Self::seated(hand);
        self.header(out, hand)?;
        for player in seated.iter() {
            writeln!(
                out,
                "Seat {}: {} ({} in chips)",
                player.seat(),
                player.name(),
                money(currency, player.starting())
            )?;
        }
        for action in hand.actions(variant.forced()) {
            writeln!(out, "{}", line(currency, action))?;
        }
        match variant {
            Variant::Flop => self.flop_streets(out, hand)?,
            Variant::Stud => self.stud_streets(out, hand, &seated)?,
        }
        for (name, amount) in hand.returned()? {
            writeln!(out, "Uncalled bet ({}) returned to {}", money(currency, *amount), name)?;
        }
        for (name, amount) in hand.collections() {
            writeln!(out, "{} collected {} from pot", name, money(currency, *amount))?;
        }
        self.summary(out, hand, &seated)?;
        Ok(std::mem::take(out))
    }
}

impl Stars {
    /// Players who took part in the forced bets or the first round.
    fn seated(hand: &HandAccumulator) -> Vec<&Player> {
        let variant = hand.game().variant();
        let mut acted = hand.log().actors(variant.forced());
        acted.extend(hand.log().actors(variant.opening()));
        hand.players()
            .iter()
            .filter(|p| acted.contains(p.name()))
            .collect()
    }

    fn header(&self, out: &mut String, hand: &HandAccumulator) -> std::fmt::Result {
        let game = hand.game();
        let info = hand.info();
        let stakes = match game.currency {
            Currency::Chips => format!("{}/{}", money(game.currency, game.sb), money(game.currency, game.bb)),
            currency => format!(
                "{}/{} {}",
                money(currency, game.sb),
                money(currency, game.bb),
                currency
            ),
        };
        writeln!(
            out,
            "PokerStars Game #{}: {} ({}) - {}",
            info.id,
            game,
            stakes,
            info.started.format("%Y/%m/%d %H:%M:%S UTC")
        )?;
        match info.button {
            Some(seat) => writeln!(
                out,
                "Table '{}' {}-max Seat #{} is the button",
                info.table, info.max_seats, seat
            ),
            None => writeln!(out, "Table '{}' {}-max", info.table, info.max_seats),
        }
    }

    fn flop_streets(&self, out: &mut String, hand: &HandAccumulator) -> std::fmt::Result {
        let currency = hand.game().currency;
        writeln!(out, "*** HOLE CARDS ***")?;
        if let Some(hero) = hand.hero() {
            writeln!(out, "Dealt to {} [{}]", hero, cards(hand.hole_cards(hero)))?;
        }
        for action in hand.actions(Segment::Preflop) {
            writeln!(out, "{}", line(currency, action))?;
        }
        let mut dealt = Vec::<Card>::new();
        for segment in [Segment::Flop, Segment::Turn, Segment::River] {
            let board = hand.board(segment);
            if board.is_empty() {
                continue;
            }
            let name = segment.to_string().to_uppercase();
            match dealt.is_empty() {
                true => writeln!(out, "*** {} *** [{}]", name, cards(board))?,
                false => writeln!(out, "*** {} *** [{}] [{}]", name, cards(&dealt), cards(board))?,
            }
            dealt.extend_from_slice(board);
            for action in hand.actions(segment) {
                writeln!(out, "{}", line(currency, action))?;
            }
        }
        Ok(())
    }

    fn stud_streets(&self, out: &mut String, hand: &HandAccumulator, seated: &[&Player]) -> std::fmt::Result {
        let currency = hand.game().currency;
        let streets = [
            (Segment::Third, "3RD STREET"),
            (Segment::Fourth, "4TH STREET"),
            (Segment::Fifth, "5TH STREET"),
            (Segment::Sixth, "6TH STREET"),
            (Segment::Seventh, "7TH STREET"),
        ];
        for (segment, name) in streets {
            let dealt = seated
                .iter()
                .filter_map(|p| hand.dealt(p.name(), segment).map(|d| (p.name(), d)))
                .collect::<Vec<_>>();
            let actions = hand.actions(segment);
            if dealt.is_empty() && actions.is_empty() {
                continue;
            }
            writeln!(out, "*** {} ***", name)?;
            for (player, d) in dealt {
                write!(out, "Dealt to {}", player)?;
                if !d.closed.is_empty() {
                    write!(out, " [{}]", cards(&d.closed))?;
                }
                if !d.open.is_empty() {
                    write!(out, " [{}]", cards(&d.open))?;
                }
                writeln!(out)?;
            }
            for action in actions {
                writeln!(out, "{}", line(currency, action))?;
            }
        }
        Ok(())
    }

    fn summary(&self, out: &mut String, hand: &HandAccumulator, seated: &[&Player]) -> anyhow::Result<()> {
        let currency = hand.game().currency;
        let total = hand.total_pot()?;
        let pots = hand.pots()?;
        writeln!(out, "*** SUMMARY ***")?;
        write!(out, "Total pot {}", money(currency, total))?;
        match pots {
            [] | [_] => {}
            [main, side] => write!(
                out,
                " Main pot {}. Side pot {}.",
                money(currency, *main),
                money(currency, *side)
            )?,
            [main, sides @ ..] => {
                write!(out, " Main pot {}.", money(currency, *main))?;
                for (i, side) in sides.iter().enumerate() {
                    write!(out, " Side pot-{} {}.", i + 1, money(currency, *side))?;
                }
            }
        }
        writeln!(out, " | Rake {}", money(currency, hand.rake()?))?;
        let board = hand.board_cards().collect::<Vec<_>>();
        if !board.is_empty() {
            writeln!(out, "Board [{}]", cards(&board))?;
        }
        let collected = hand.collected();
        for player in seated {
            let name = player.name();
            write!(out, "Seat {}: {} ", player.seat(), name)?;
            match (collected.get(name), hand.has_shown(name)) {
                (Some(won), true) => writeln!(
                    out,
                    "showed [{}] and won ({})",
                    cards(hand.hole_cards(name)),
                    money(currency, *won)
                )?,
                (Some(won), false) => writeln!(out, "collected ({})", money(currency, *won))?,
                (None, true) => writeln!(out, "showed [{}]", cards(hand.hole_cards(name)))?,
                (None, false) if hand.has_folded(name) => writeln!(out, "folded")?,
                (None, false) => writeln!(out, "mucked")?,
            }
        }
        Ok(())
    }
}

/// Whole amounts print bare, anything else to the cent.
fn money(currency: Currency, amount: Chips) -> String {
    let amount = amount.normalize();
    match amount.scale() {
        0 => format!("{}{}", currency.symbol(), amount),
        _ => format!("{}{:.2}", currency.symbol(), amount),
    }
}

fn cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn line(currency: Currency, action: &Action) -> String {
    let name = action.player();
    let all_in = match action.is_all_in() && !action.play().is_passive() {
        true => " and is all-in",
        false => "",
    };
    match action.play() {
        Play::Fold => format!("{}: folds", name),
        Play::Check => format!("{}: checks", name),
        Play::Call { amount } => format!("{}: calls {}{}", name, money(currency, *amount), all_in),
        Play::Bet { amount } => format!("{}: bets {}{}", name, money(currency, *amount), all_in),
        Play::Raise(raise) => format!(
            "{}: raises {} to {}{}",
            name,
            money(currency, raise.raise_by()),
            money(currency, raise.raise_to()),
            all_in
        ),
        Play::Post { post, amount } => {
            let what = match post {
                Post::SmallBlind => "posts small blind",
                Post::BigBlind => "posts big blind",
                Post::BothBlinds => "posts small & big blinds",
                Post::Ante => "posts the ante",
                Post::BringIn => "brings in for",
            };
            format!("{}: {} {}{}", name, what, money(currency, *amount), all_in)
        }
    }
}
