use log::trace;

use crate::constants::SPRITE_HEIGHT;
use crate::keypad::Keypad;
use crate::opcode::Opcode;
use crate::random::RandomStream;
use crate::state::State;

/// What an operation may consult beyond the interpreter state
pub struct Context<'a> {
    pub keypad: &'a dyn Keypad,
    pub rng: &'a mut RandomStream,
}

// Every operation runs after the pc has already been moved past its own opcode,
// so "skip" means advancing the pc one more instruction.

/// Opcode without a defined operation
pub fn nop(op: u16, _state: &mut State, _ctx: &mut Context) {
    trace!("ignoring undefined opcode {:04X}", op);
}

/// clear
pub fn clr(_op: u16, state: &mut State, _ctx: &mut Context) {
    state.frame_buffer.clear();
    state.draw_flag = true;
}

/// PC = STACK.pop()
pub fn rts(_op: u16, state: &mut State, _ctx: &mut Context) {
    match state.stack.pop() {
        Some(addr) => state.set_pc(addr),
        None => trace!("return with an empty stack ignored"),
    }
}

/// PC = addr
pub fn jump(op: u16, state: &mut State, _ctx: &mut Context) {
    state.set_pc(op.addr());
}

/// STACK.push(PC); PC = addr
pub fn call(op: u16, state: &mut State, _ctx: &mut Context) {
    if state.stack.push(state.pc()) {
        state.set_pc(op.addr());
    } else {
        trace!("call to {:03X} with a full stack ignored", op.addr());
    }
}

/// if Vx == kk then pc += 2
pub fn ske(op: u16, state: &mut State, _ctx: &mut Context) {
    if state.v[op.x() as usize] == op.kk() {
        state.advance_pc();
    }
}

/// if Vx != kk then pc += 2
pub fn skne(op: u16, state: &mut State, _ctx: &mut Context) {
    if state.v[op.x() as usize] != op.kk() {
        state.advance_pc();
    }
}

/// if Vx == Vy then pc += 2
pub fn skre(op: u16, state: &mut State, _ctx: &mut Context) {
    if state.v[op.x() as usize] == state.v[op.y() as usize] {
        state.advance_pc();
    }
}

/// Vx = kk
pub fn load(op: u16, state: &mut State, _ctx: &mut Context) {
    state.v[op.x() as usize] = op.kk();
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(op: u16, state: &mut State, _ctx: &mut Context) {
    let x = op.x() as usize;
    state.v[x] = state.v[x].wrapping_add(op.kk());
}

/// Vx = Vy
pub fn mv(op: u16, state: &mut State, _ctx: &mut Context) {
    state.v[op.x() as usize] = state.v[op.y() as usize];
}

/// Vx |= Vy
pub fn or(op: u16, state: &mut State, _ctx: &mut Context) {
    state.v[op.x() as usize] |= state.v[op.y() as usize];
}

/// Vx &= Vy
pub fn and(op: u16, state: &mut State, _ctx: &mut Context) {
    state.v[op.x() as usize] &= state.v[op.y() as usize];
}

/// Vx ^= Vy
pub fn xor(op: u16, state: &mut State, _ctx: &mut Context) {
    state.v[op.x() as usize] ^= state.v[op.y() as usize];
}

/// Vx += Vy; VF = carry
pub fn addr(op: u16, state: &mut State, _ctx: &mut Context) {
    let sum = u16::from(state.v[op.x() as usize]) + u16::from(state.v[op.y() as usize]);
    state.set_flag(sum > 0xFF);
    state.v[op.x() as usize] = sum as u8;
}

/// Vx -= Vy; VF = !borrow
pub fn sub(op: u16, state: &mut State, _ctx: &mut Context) {
    let (vx, vy) = (state.v[op.x() as usize], state.v[op.y() as usize]);
    state.set_flag(vx >= vy);
    state.v[op.x() as usize] = vx.wrapping_sub(vy);
}

/// Vx >>= 1; VF = shifted out bit
pub fn shr(op: u16, state: &mut State, _ctx: &mut Context) {
    let vx = state.v[op.x() as usize];
    state.set_flag(vx & 0x1 == 0x1);
    state.v[op.x() as usize] = vx >> 1;
}

/// Vx = Vy - Vx; VF = !borrow
pub fn subn(op: u16, state: &mut State, _ctx: &mut Context) {
    let (vx, vy) = (state.v[op.x() as usize], state.v[op.y() as usize]);
    state.set_flag(vy >= vx);
    state.v[op.x() as usize] = vy.wrapping_sub(vx);
}

/// Vx <<= 1; VF = shifted out bit
pub fn shl(op: u16, state: &mut State, _ctx: &mut Context) {
    let vx = state.v[op.x() as usize];
    state.set_flag(vx & 0x80 == 0x80);
    state.v[op.x() as usize] = vx << 1;
}

/// if Vx != Vy then pc += 2
pub fn skrne(op: u16, state: &mut State, _ctx: &mut Context) {
    if state.v[op.x() as usize] != state.v[op.y() as usize] {
        state.advance_pc();
    }
}

/// I = addr
pub fn loadi(op: u16, state: &mut State, _ctx: &mut Context) {
    state.i = op.addr();
}

/// PC = V0 + addr
pub fn jumpi(op: u16, state: &mut State, _ctx: &mut Context) {
    state.set_pc(op.addr() + u16::from(state.v[0x0]));
}

/// Vx = rand_byte & kk
pub fn rand(op: u16, state: &mut State, ctx: &mut Context) {
    state.v[op.x() as usize] = ctx.rng.next_byte() & op.kk();
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer, clipping at the edges.
/// Sets VF if any pixels were erased
pub fn draw(op: u16, state: &mut State, _ctx: &mut Context) {
    let mut sprite = [0u8; 0xF];
    let sprite = &mut sprite[..op.n() as usize];
    for (row, byte) in sprite.iter_mut().enumerate() {
        *byte = state.memory.read(state.i.wrapping_add(row as u16));
    }

    let (x, y) = (state.v[op.x() as usize], state.v[op.y() as usize]);
    let collision = state.frame_buffer.draw_sprite(x, y, sprite);
    state.set_flag(collision);
    state.draw_flag = true;
}

/// if Vx.pressed then pc += 2
pub fn skpr(op: u16, state: &mut State, ctx: &mut Context) {
    if ctx.keypad.is_pressed(state.v[op.x() as usize]) {
        state.advance_pc();
    }
}

/// if !Vx.pressed then pc += 2
pub fn skup(op: u16, state: &mut State, ctx: &mut Context) {
    if !ctx.keypad.is_pressed(state.v[op.x() as usize]) {
        state.advance_pc();
    }
}

/// Vx = DT
pub fn moved(op: u16, state: &mut State, _ctx: &mut Context) {
    state.v[op.x() as usize] = state.delay_timer;
}

/// await keypress for Vx
pub fn keyd(op: u16, state: &mut State, _ctx: &mut Context) {
    state.register_needing_key = Some(op.x());
}

/// DT = Vx
pub fn loads(op: u16, state: &mut State, _ctx: &mut Context) {
    state.delay_timer = state.v[op.x() as usize];
}

/// ST = Vx
pub fn ld(op: u16, state: &mut State, _ctx: &mut Context) {
    state.sound_timer = state.v[op.x() as usize];
}

/// I += Vx
pub fn addi(op: u16, state: &mut State, _ctx: &mut Context) {
    state.i = state.i.wrapping_add(u16::from(state.v[op.x() as usize]));
}

/// I = Vx * 5
/// Set I to the memory address of the sprite for the low nibble of Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(op: u16, state: &mut State, _ctx: &mut Context) {
    state.i = u16::from(state.v[op.x() as usize] & 0xF) * SPRITE_HEIGHT;
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i, hundreds first
pub fn bcd(op: u16, state: &mut State, _ctx: &mut Context) {
    let vx = state.v[op.x() as usize];
    let digits = [vx / 100, vx / 10 % 10, vx % 10];
    state.memory.load(state.i, &digits);
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(op: u16, state: &mut State, _ctx: &mut Context) {
    let count = op.x() as usize + 1;
    state.memory.load(state.i, &state.v[..count]);
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(op: u16, state: &mut State, _ctx: &mut Context) {
    for reg in 0..=op.x() {
        state.v[reg as usize] = state.memory.read(state.i.wrapping_add(u16::from(reg)));
    }
}
