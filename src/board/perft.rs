use super::error::InternalError;
use super::types::Move;
use super::Position;

impl Position {
    /// Count legal leaf positions `depth` plies below this one.
    pub fn perft(&mut self, depth: usize) -> Result<u64, InternalError> {
        if depth == 0 {
            return Ok(1);
        }

        let mut nodes = 0;
        for mv in self.generate_moves() {
            if !self.make_move(mv)? {
                continue;
            }
            nodes += self.perft(depth - 1)?;
            self.unmake_move()?;
        }
        Ok(nodes)
    }

    /// Leaf counts below each legal root move, in generation order.
    pub fn perft_divide(&mut self, depth: usize) -> Result<Vec<(Move, u64)>, InternalError> {
        let mut divide = Vec::new();
        if depth == 0 {
            return Ok(divide);
        }
        for mv in self.generate_moves() {
            if !self.make_move(mv)? {
                continue;
            }
            let nodes = self.perft(depth - 1)?;
            self.unmake_move()?;
            log::debug!("perft {mv}: {nodes}");
            divide.push((mv, nodes));
        }
        Ok(divide)
    }
}
