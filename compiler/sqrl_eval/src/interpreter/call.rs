//! Function, operator and class invocation.

use std::rc::Rc;

use sqrl_value::{
    ClassValue, ErrorKind, EvalResult, FrameId, FrameKind, FunctionValue, Identifier, List,
    OperatorValue, Resolution, Value, ValueKind,
};

use super::Interpreter;

impl Interpreter {
    /// Call whatever `name` resolves to with `args`, from `caller`.
    ///
    /// Arguments are evaluated in `caller` before the call unless the callee
    /// is quoted, in which case it sees them raw.
    ///
    /// Any call from a frame at the depth ceiling fails with `StackLimit`,
    /// whatever the callee is.
    #[tracing::instrument(level = "debug", skip_all, fields(name = %name))]
    pub fn call_function(&mut self, name: &Identifier, args: &List, caller: FrameId) -> EvalResult {
        if self.frames.get(caller).depth() >= self.max_call_depth {
            return Err(self.raise(ErrorKind::StackLimit(name.to_string()), caller));
        }
        let resolution = self.find_owner(name, caller, false)?;
        let callee = self.read_resolved(name, resolution, caller)?;
        let lazy = callee.is_quoted();

        if !matches!(
            callee.kind,
            ValueKind::Function(_) | ValueKind::Operator(_) | ValueKind::Class(_)
        ) {
            return Err(self.raise(ErrorKind::NotCallable(callee.name()), caller));
        }
        let args = if lazy {
            args.clone()
        } else {
            self.evaluate_list(args, caller)?
        };

        match &callee.kind {
            ValueKind::Function(func) => self.call_user(func, resolution, &args, caller, lazy),
            ValueKind::Operator(op) => self.call_operator(op, &args, caller),
            ValueKind::Class(class) => self.instantiate(class, &args, caller),
            _ => Err(self.raise(ErrorKind::NotCallable(callee.name()), caller)),
        }
    }

    fn call_operator(&mut self, op: &OperatorValue, args: &List, caller: FrameId) -> EvalResult {
        match (op.func)(self, args, caller)? {
            Value {
                kind: ValueKind::Exception(ex),
                ..
            } => Err(ex),
            value => Ok(value),
        }
    }

    /// Bind parameters in a fresh function frame and run the body.
    ///
    /// The frame is one level deeper than the caller. A method found through an object runs under that object; anything
    /// else runs under the caller.
    fn call_user(
        &mut self,
        func: &FunctionValue,
        resolution: Resolution,
        args: &List,
        caller: FrameId,
        lazy: bool,
    ) -> EvalResult {
        let parent = if self.frames.get(resolution.func).kind() == FrameKind::Class {
            resolution.exec
        } else {
            caller
        };
        let depth = self.frames.get(caller).depth() + 1;
        let frame = self.new_frame_at(parent, FrameKind::Function, Some(func.name.clone()), depth);

        let params = func.params.values();
        for (i, param) in params.iter().enumerate().take(args.len()) {
            let Some(param_path) = param.as_path() else {
                return Err(self.raise(
                    ErrorKind::InvalidParameter(Value::list(func.params.clone()).to_print_string()),
                    frame,
                ));
            };
            if param.is_quoted() {
                let rest = args.sub(i, None);
                let rest = if lazy {
                    self.evaluate_list(&rest, caller)?
                } else {
                    rest.copy()
                };
                self.set(param_path, Value::list(rest), frame)?;
                break;
            }
            let arg = args.at(i).unwrap_or_default();
            let arg = if lazy {
                self.evaluate(&arg, caller)?
            } else {
                arg
            };
            self.set(param_path, arg, frame)?;
        }

        self.evaluate_body(&func.body, frame)
            .map_err(|ex| self.wrap(ex, frame))
    }

    /// Build an object: a frame under the class frame, `_init` run in it,
    /// then the arguments run in it as a body.
    fn instantiate(&mut self, class: &Rc<ClassValue>, args: &List, caller: FrameId) -> EvalResult {
        let depth = self.frames.get(caller).depth();
        let frame = self.new_frame_at(class.frame, FrameKind::Object, Some(class.name.clone()), depth);
        tracing::debug!(class = %class.name, %frame, "instantiate");

        let init = self.symbols.reserved().init.clone();
        let hook = self.frames.get(class.frame).lookup(&init).cloned();
        if let Some(Value {
            kind: ValueKind::Function(hook),
            ..
        }) = hook
        {
            self.evaluate_body(&hook.body, frame)
                .map_err(|ex| self.wrap(ex, frame))?;
        }
        self.evaluate_body(args, frame)
            .map_err(|ex| self.wrap(ex, frame))?;

        Ok(Value::object(Rc::clone(class), frame))
    }
}
