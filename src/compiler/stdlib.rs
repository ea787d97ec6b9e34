//! Runtime support for generated programs.
//!
//! Every program carries a small runtime object, bound to `$rt`, with the
//! helpers the generated code relies on:
//!
//! - `record(definitions)` builds an object from `[name, thunk]` pairs. Each
//!   property runs its thunk on first read and caches the result, so a
//!   definition is evaluated at most once and only if it is used. Reading a
//!   property while its own thunk is running throws.
//! - `curry(arity, f)` wraps `f` so that a call with fewer than `arity`
//!   arguments returns a partial application. A partial application is a
//!   function with `arity` (arguments still missing) and `captured`
//!   (arguments supplied so far) properties.

/// The runtime object literal, bound to `$rt` by `generate_program`.
pub const RUNTIME: &str = r#"{
  record: function record(definitions) {
    var target = Object.create(null);
    definitions.forEach(function (definition) {
      var name = definition[0];
      var thunk = definition[1];
      var state = 0;
      var value;
      Object.defineProperty(target, name, {
        enumerable: true,
        configurable: true,
        get: function () {
          if (state === 2) {
            return value;
          }
          if (state === 1) {
            throw new Error("Cyclic definition of [" + name + "].");
          }
          state = 1;
          try {
            value = thunk();
          } catch (e) {
            state = 0;
            throw e;
          }
          state = 2;
          return value;
        }
      });
    });
    return target;
  },
  curry: function curry(arity, f) {
    function partial(captured) {
      var applied = function () {
        var args = captured.concat(Array.prototype.slice.call(arguments));
        if (args.length < arity) {
          return partial(args);
        }
        return f.apply(null, args);
      };
      applied.arity = arity - captured.length;
      applied.captured = captured;
      return applied;
    }
    return partial([]);
  }
}"#;

/// The name the runtime is bound to inside a generated program.
pub const RUNTIME_NAME: &str = "$rt";

/// The parameter holding the global object inside a generated program.
pub const GLOBALS_NAME: &str = "$globals";
