use crate::error::{Error, Result};
use crate::utils::*;

pub const EXAMPLE: &str = "\
Game 1: 3 blue, 4 red; 1 red, 2 green, 6 blue; 2 green
Game 2: 1 blue, 2 green; 3 green, 4 blue, 1 red; 1 green, 1 blue
Game 3: 8 green, 6 blue, 20 red; 5 blue, 4 red, 13 green; 5 green, 1 red
Game 4: 1 green, 3 red, 6 blue; 3 green, 6 red; 3 green, 15 blue, 14 red
Game 5: 6 red, 1 blue, 3 green; 2 blue, 1 red, 2 green
";

const BAG: Draw = Draw { red: 12, green: 13, blue: 14 };

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
struct Draw {
    red: u32,
    green: u32,
    blue: u32,
}

impl Draw {
    fn parse(s: &str, line: &str) -> Result<Self> {
        let mut draw = Self::default();
        for cubes in s.split(',') {
            let (n, colour) = split_once(cubes.trim(), " ", "'<count> <colour>'")?;
            let n = parse_int::<u32>(n, line)?;
            match colour {
                "red" => draw.red = n,
                "green" => draw.green = n,
                "blue" => draw.blue = n,
                _ => return Err(Error::parse(line, format!("unknown colour {:?}", colour))),
            }
        }
        Ok(draw)
    }

    #[inline]
    fn fits_in(&self, bag: &Self) -> bool {
        self.red <= bag.red && self.green <= bag.green && self.blue <= bag.blue
    }

    #[inline]
    fn max(self, other: Self) -> Self {
        Self {
            red: self.red.max(other.red),
            green: self.green.max(other.green),
            blue: self.blue.max(other.blue),
        }
    }

    #[inline]
    fn power(&self) -> Option<u64> {
        (self.red as u64).checked_mul(self.green as u64)?.checked_mul(self.blue as u64)
    }
}

#[derive(Clone, Debug)]
struct Game {
    id: u32,
    draws: Vec<Draw>,
}

impl Game {
    fn parse(line: &str) -> Result<Self> {
        let (head, draws) = split_once(line, ": ", "'Game <id>: '")?;
        let id = head
            .strip_prefix("Game ")
            .ok_or_else(|| Error::parse(line, "expected 'Game <id>'"))?;
        let id = parse_int(id, line)?;
        let draws = draws.split(';').map(|draw| Draw::parse(draw, line)).collect::<Result<_>>()?;
        Ok(Self { id, draws })
    }
}

fn parse(s: &str) -> Result<Vec<Game>> {
    lines(s).map(Game::parse).collect()
}

pub fn part1(s: &str) -> Result<u64> {
    let games = parse(s)?;
    let fits = games.iter().filter(|g| g.draws.iter().all(|d| d.fits_in(&BAG)));
    Ok(fits.map(|g| g.id as u64).sum())
}

pub fn part2(s: &str) -> Result<u64> {
    lines(s).try_fold(0, |total: u64, line| -> Result<u64> {
        let game = Game::parse(line)?;
        let bag = game.draws.iter().fold(Draw::default(), |a, &d| a.max(d));
        bag.power()
            .and_then(|power| total.checked_add(power))
            .ok_or_else(|| Error::parse(line, "power overflows"))
    })
}

#[test]
fn test_day02_part1() {
    assert_eq!(part1(EXAMPLE).unwrap(), 8);
}

#[test]
fn test_day02_part2() {
    assert_eq!(part2(EXAMPLE).unwrap(), 2286);
}

#[test]
fn test_day02_large_power() {
    assert_eq!(part2("Game 1: 2000 red, 2000 green, 2000 blue").unwrap(), 8_000_000_000);
    let max = u32::MAX;
    let line = format!("Game 1: {} red, {} green, {} blue", max, max, max);
    let err = part2(&line).unwrap_err();
    assert!(matches!(err, Error::Parse { ref reason, .. } if reason == "power overflows"));
}

#[test]
fn test_day02_parse_errors() {
    assert!(matches!(part1("Game 1: 3 purple"), Err(Error::Parse { .. })));
    assert!(matches!(part1("Round 1: 3 red"), Err(Error::Parse { .. })));
    assert!(matches!(part1("Game 1 3 red"), Err(Error::Parse { .. })));
}
